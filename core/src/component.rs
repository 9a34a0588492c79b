//! Declarative component descriptions.

use std::fmt;

use serde::Deserialize;

use crate::deferred::Deferred;
use crate::highlight::HighlightSpec;
use crate::provider::Provider;

/// One chunk of status text with its decorations.
///
/// Any field other than the providers may be computed at render time
/// through [`Deferred::Computed`]. Components read from config only ever
/// hold literals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Component {
    /// Free-form label, only used in logs.
    pub name: Option<String>,
    pub provider: Option<Provider>,
    /// Narrower alternative tried when the statusline overflows.
    pub short_provider: Option<Provider>,
    pub icon: Option<Deferred<Decoration>>,
    pub hl: Option<Deferred<HighlightSpec>>,
    pub left_sep: Option<Deferred<Separators>>,
    pub right_sep: Option<Deferred<Separators>>,
    pub enabled: Option<Deferred<bool>>,
    /// Lower values are shortened and hidden first.
    pub priority: Deferred<i32>,
    /// Drop the whole component when shortening alone doesn't fit.
    pub truncate_hide: Deferred<bool>,
}

impl Component {
    pub fn new(provider: impl Into<Provider>) -> Self {
        Self {
            provider: Some(provider.into()),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_short_provider(mut self, provider: impl Into<Provider>) -> Self {
        self.short_provider = Some(provider.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<Deferred<Decoration>>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_hl(mut self, hl: impl Into<Deferred<HighlightSpec>>) -> Self {
        self.hl = Some(hl.into());
        self
    }

    pub fn with_left_sep(mut self, sep: impl Into<Deferred<Separators>>) -> Self {
        self.left_sep = Some(sep.into());
        self
    }

    pub fn with_right_sep(mut self, sep: impl Into<Deferred<Separators>>) -> Self {
        self.right_sep = Some(sep.into());
        self
    }

    pub fn with_enabled(mut self, enabled: impl Into<Deferred<bool>>) -> Self {
        self.enabled = Some(enabled.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Deferred<i32>>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn truncate_hide(self) -> Self {
        self.with_truncate_hide(true)
    }

    pub fn with_truncate_hide(mut self, hide: impl Into<Deferred<bool>>) -> Self {
        self.truncate_hide = hide.into();
        self
    }

    /// Components are enabled unless they say otherwise.
    pub fn is_enabled(&self) -> bool {
        self.enabled.as_ref().is_none_or(Deferred::get)
    }
}

/// An icon or separator glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "DecorationRepr")]
pub struct Decoration {
    pub text: String,
    /// Explicit highlight. Without one the glyph is drawn in the
    /// component's background over the default background.
    pub hl: Option<HighlightSpec>,
    /// Draw even when the component's text is empty.
    pub always_visible: bool,
}

impl Decoration {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_hl(mut self, hl: impl Into<HighlightSpec>) -> Self {
        self.hl = Some(hl.into());
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.always_visible = true;
        self
    }
}

impl From<&str> for Decoration {
    fn from(text: &str) -> Self {
        Decoration::new(text)
    }
}

impl From<&str> for Deferred<Decoration> {
    fn from(text: &str) -> Self {
        Deferred::Literal(Decoration::new(text))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecorationRepr {
    Text(String),
    Table {
        #[serde(rename = "str", default)]
        text: String,
        #[serde(default)]
        hl: Option<HighlightSpec>,
        #[serde(default)]
        always_visible: bool,
    },
}

impl From<DecorationRepr> for Decoration {
    fn from(repr: DecorationRepr) -> Self {
        match repr {
            DecorationRepr::Text(text) => Decoration::new(text),
            DecorationRepr::Table {
                text,
                hl,
                always_visible,
            } => Decoration {
                text,
                hl,
                always_visible,
            },
        }
    }
}

/// Separators on one side of a component, drawn in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Separators(pub Vec<Decoration>);

impl Separators {
    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.0.iter()
    }
}

impl From<Decoration> for Separators {
    fn from(decoration: Decoration) -> Self {
        Separators(vec![decoration])
    }
}

impl From<Vec<Decoration>> for Separators {
    fn from(decorations: Vec<Decoration>) -> Self {
        Separators(decorations)
    }
}

impl From<&str> for Deferred<Separators> {
    fn from(text: &str) -> Self {
        Deferred::Literal(Decoration::new(text).into())
    }
}

impl From<Decoration> for Deferred<Separators> {
    fn from(decoration: Decoration) -> Self {
        Deferred::Literal(decoration.into())
    }
}

impl From<Vec<Decoration>> for Deferred<Separators> {
    fn from(decorations: Vec<Decoration>) -> Self {
        Deferred::Literal(Separators(decorations))
    }
}

impl From<&str> for Deferred<HighlightSpec> {
    fn from(group: &str) -> Self {
        Deferred::Literal(group.into())
    }
}

impl From<crate::highlight::HighlightColors> for Deferred<HighlightSpec> {
    fn from(colors: crate::highlight::HighlightColors) -> Self {
        Deferred::Literal(colors.into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Decoration),
    Many(Vec<Decoration>),
}

impl From<OneOrMany> for Separators {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(decoration) => Separators(vec![decoration]),
            OneOrMany::Many(decorations) => Separators(decorations),
        }
    }
}

/// An ordered group of components. Sections are separated by an alignment
/// marker the host expands into padding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Section {
    #[serde(rename = "component")]
    pub components: Vec<Component>,
}

impl Section {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }
}

/// Declared position of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentIndex {
    pub section: usize,
    pub component: usize,
}

impl fmt::Display for ComponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}, component {}", self.section, self.component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HighlightColors;
    use pretty_assertions::assert_eq;

    #[test]
    fn decorations_deserialize_from_string_or_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            plain: Decoration,
            table: Decoration,
        }
        let parsed: Wrapper = toml::from_str(
            r#"
            plain = "slant_left"
            table = { str = " ", hl = { bg = "oceanblue" }, always_visible = true }
            "#,
        )
        .expect("parse");

        assert_eq!(parsed.plain, Decoration::new("slant_left"));
        assert_eq!(
            parsed.table,
            Decoration::new(" ")
                .with_hl(HighlightColors::new().bg("oceanblue"))
                .always_visible()
        );
    }

    #[test]
    fn separators_accept_one_or_many() {
        #[derive(Deserialize)]
        struct Wrapper {
            one: Separators,
            many: Separators,
        }
        let parsed: Wrapper = toml::from_str(
            r#"
            one = "block"
            many = ["slant_left_2", { str = " " }]
            "#,
        )
        .expect("parse");

        assert_eq!(parsed.one, Separators(vec![Decoration::new("block")]));
        assert_eq!(
            parsed.many,
            Separators(vec![Decoration::new("slant_left_2"), Decoration::new(" ")])
        );
    }

    #[test]
    fn component_fields_deserialize() {
        let component: Component = toml::from_str(
            r#"
            provider = "position"
            hl = "Comment"
            enabled = false
            priority = -2
            truncate_hide = true
            "#,
        )
        .expect("parse");

        assert!(!component.is_enabled());
        assert_eq!(component.priority.get(), -2);
        assert!(component.truncate_hide.get());
        assert_eq!(
            component.hl.as_ref().map(Deferred::get),
            Some(HighlightSpec::Group("Comment".to_string()))
        );
    }

    #[test]
    fn unknown_component_fields_are_rejected() {
        let error = toml::from_str::<Component>("provder = \"position\"").unwrap_err();
        assert!(error.to_string().contains("provder"));
    }

    #[test]
    fn computed_enabled_is_read_each_time() {
        use std::sync::Arc;
        use std::sync::atomic::AtomicBool;
        use std::sync::atomic::Ordering;

        let flag = Arc::new(AtomicBool::new(true));
        let reader = Arc::clone(&flag);
        let component = Component::new("x")
            .with_enabled(Deferred::computed(move || reader.load(Ordering::SeqCst)));

        assert!(component.is_enabled());
        flag.store(false, Ordering::SeqCst);
        assert!(!component.is_enabled());
    }
}

//! Highlight resolution and the process-lifetime registration cache.
//!
//! Every component, icon and separator needs a highlight name to emit in a
//! `%#Name#` marker. Resolving a highlight turns its possibly partial,
//! possibly palette-relative description into a concrete [`Highlight`] and
//! picks the name it is registered under:
//!
//! - a bare group name (`hl = "Comment"`) is trusted and never registered;
//! - an explicit `name` is used verbatim and registered the first time it is
//!   seen, later sightings reuse the first registration;
//! - everything else is registered under a canonical name derived from the
//!   resolved triple, so equal triples share one host registration.

use std::collections::HashMap;
use std::fmt;

use ratatui::style::Color;
use ratatui::style::Modifier;
use serde::Deserialize;
use tracing::trace;

use crate::config::DefaultHighlights;
use crate::error::ParseError;
use crate::host::Host;
use crate::palette::Palette;

/// Base highlight of the active window's statusline.
pub const ACTIVE_DEFAULT: &str = "StatusLine";
/// Base highlight of inactive windows' statuslines.
pub const INACTIVE_DEFAULT: &str = "StatusLineNC";

const CANONICAL_PREFIX: &str = "StatusComponent";

const STYLE_NAMES: &[(Modifier, &str)] = &[
    (Modifier::BOLD, "bold"),
    (Modifier::DIM, "dim"),
    (Modifier::ITALIC, "italic"),
    (Modifier::UNDERLINED, "underline"),
    (Modifier::SLOW_BLINK, "blink"),
    (Modifier::RAPID_BLINK, "rapidblink"),
    (Modifier::REVERSED, "reverse"),
    (Modifier::HIDDEN, "hidden"),
    (Modifier::CROSSED_OUT, "strikethrough"),
];

/// A fully resolved highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight {
    pub fg: Color,
    pub bg: Color,
    pub style: Modifier,
}

impl Highlight {
    /// Deterministic name for this triple. Distinct triples never share a
    /// name: hex colors, `i<n>` indices, lowercase ANSI names and `NONE`
    /// cannot be confused with each other, and only the trailing style part
    /// may contain underscores.
    pub fn canonical_name(&self) -> String {
        format!(
            "{CANONICAL_PREFIX}_{}_{}_{}",
            color_key(self.fg),
            color_key(self.bg),
            style_key(self.style)
        )
    }
}

fn color_key(color: Color) -> String {
    match color {
        Color::Reset => "NONE".to_string(),
        Color::Rgb(r, g, b) => format!("{r:02x}{g:02x}{b:02x}"),
        Color::Indexed(index) => format!("i{index}"),
        named => format!("{named:?}").to_ascii_lowercase(),
    }
}

fn style_key(style: Modifier) -> String {
    let names: Vec<&str> = STYLE_NAMES
        .iter()
        .filter(|(modifier, _)| style.contains(*modifier))
        .map(|(_, name)| *name)
        .collect();
    if names.is_empty() {
        "NONE".to_string()
    } else {
        names.join("_")
    }
}

/// Parse a color as written in config: `#rrggbb`, an ANSI color name, a
/// 0-255 palette index, or `NONE`.
pub fn parse_color(value: &str) -> Result<Color, ParseError> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(Color::Reset);
    }
    value
        .parse::<Color>()
        .map_err(|_| ParseError::InvalidColor(value.to_string()))
}

/// Parse a comma separated attribute list such as `bold,italic`.
pub fn parse_style(value: &str) -> Result<Modifier, ParseError> {
    let mut style = Modifier::empty();
    for attribute in value.split(',').map(str::trim) {
        style |= match attribute.to_ascii_lowercase().as_str() {
            "" | "none" | "nocombine" => Modifier::empty(),
            "bold" => Modifier::BOLD,
            "dim" => Modifier::DIM,
            "italic" => Modifier::ITALIC,
            "underline" | "undercurl" | "underdouble" | "underdotted" | "underdashed" => {
                Modifier::UNDERLINED
            }
            "blink" => Modifier::SLOW_BLINK,
            "reverse" | "inverse" | "standout" => Modifier::REVERSED,
            "strikethrough" => Modifier::CROSSED_OUT,
            _ => return Err(ParseError::InvalidStyle(value.to_string())),
        };
    }
    Ok(style)
}

/// How a component, icon or separator asks to be highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HighlightSpec {
    /// A highlight group the host already knows about.
    Group(String),
    Colors(HighlightColors),
}

impl Default for HighlightSpec {
    fn default() -> Self {
        HighlightSpec::Colors(HighlightColors::default())
    }
}

impl From<HighlightColors> for HighlightSpec {
    fn from(colors: HighlightColors) -> Self {
        HighlightSpec::Colors(colors)
    }
}

impl From<&str> for HighlightSpec {
    fn from(group: &str) -> Self {
        HighlightSpec::Group(group.to_string())
    }
}

/// A possibly partial highlight. Colors may be palette names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightColors {
    pub name: Option<String>,
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub style: Option<String>,
}

impl HighlightColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn fg(mut self, fg: impl Into<String>) -> Self {
        self.fg = Some(fg.into());
        self
    }

    pub fn bg(mut self, bg: impl Into<String>) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Storage for registered highlights. Kept behind a trait so tests and
/// embedders can substitute or inspect it.
pub trait HighlightCache: fmt::Debug + Send {
    fn get(&self, name: &str) -> Option<&Highlight>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Store `highlight` under `name`, returning the previous entry.
    fn insert(&mut self, name: String, highlight: Highlight) -> Option<Highlight>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every registration, e.g. after the theme changes.
    fn reset(&mut self);
}

/// Append-only [`HighlightCache`]. Entries are bounded by the number of
/// distinct highlights a configuration can produce, not by redraw count.
#[derive(Debug, Default)]
pub struct HighlightRegistry {
    entries: HashMap<String, Highlight>,
}

impl HighlightCache for HighlightRegistry {
    fn get(&self, name: &str) -> Option<&Highlight> {
        self.entries.get(name)
    }

    fn insert(&mut self, name: String, highlight: Highlight) -> Option<Highlight> {
        self.entries.insert(name, highlight)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Result of resolving a [`HighlightSpec`]: the name to emit and the colors
/// it stands for, which children (icons, separators) inherit from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHighlight {
    pub name: String,
    pub highlight: Highlight,
}

/// Resolves highlights against a palette, registering new ones with the
/// host through the cache.
pub(crate) struct HighlightScope<'a> {
    pub(crate) cache: &'a mut dyn HighlightCache,
    pub(crate) host: &'a mut dyn Host,
    palette: &'a Palette,
}

impl<'a> HighlightScope<'a> {
    pub(crate) fn new(
        cache: &'a mut dyn HighlightCache,
        host: &'a mut dyn Host,
        palette: &'a Palette,
    ) -> Self {
        Self {
            cache,
            host,
            palette,
        }
    }

    /// Resolve `raw` to a name the host can paint with. Missing fields come
    /// from `parent`, then from the palette defaults.
    pub(crate) fn resolve_name(
        &mut self,
        raw: &HighlightSpec,
        parent: Option<&Highlight>,
    ) -> Result<ResolvedHighlight, ParseError> {
        let colors = match raw {
            HighlightSpec::Group(name) => {
                let highlight = match self.cache.get(name) {
                    Some(known) => *known,
                    None => self.palette.default_highlight()?,
                };
                return Ok(ResolvedHighlight {
                    name: name.clone(),
                    highlight,
                });
            }
            HighlightSpec::Colors(colors) => colors,
        };

        if let Some(name) = colors.name.as_deref()
            && let Some(existing) = self.cache.get(name)
        {
            return Ok(ResolvedHighlight {
                name: name.to_string(),
                highlight: *existing,
            });
        }

        let highlight = self.resolve_colors(colors, parent)?;
        let name = match colors.name.as_ref() {
            Some(name) => name.clone(),
            None => highlight.canonical_name(),
        };
        self.register(&name, highlight);
        Ok(ResolvedHighlight { name, highlight })
    }

    /// Register a concrete triple under its canonical name.
    pub(crate) fn register_canonical(&mut self, highlight: Highlight) -> String {
        let name = highlight.canonical_name();
        self.register(&name, highlight);
        name
    }

    /// Highlight for a separator or icon without its own: the parent's
    /// background drawn over the default background.
    pub(crate) fn notch(&self, parent: &Highlight) -> Result<Highlight, ParseError> {
        let defaults = self.palette.default_highlight()?;
        Ok(Highlight {
            fg: parent.bg,
            bg: defaults.bg,
            style: Modifier::empty(),
        })
    }

    /// Refresh the window base highlights. Literal defaults are registered
    /// once; computed ones are re-evaluated and re-registered every call.
    pub(crate) fn regenerate_defaults(
        &mut self,
        defaults: &DefaultHighlights,
    ) -> Result<(), ParseError> {
        self.define_defaults(defaults, false)
    }

    /// Register both window base highlights again, literal or not. Used when
    /// the configuration they come from is replaced.
    pub(crate) fn redefine_defaults(
        &mut self,
        defaults: &DefaultHighlights,
    ) -> Result<(), ParseError> {
        self.define_defaults(defaults, true)
    }

    fn define_defaults(
        &mut self,
        defaults: &DefaultHighlights,
        force: bool,
    ) -> Result<(), ParseError> {
        for (name, spec) in [
            (ACTIVE_DEFAULT, &defaults.active),
            (INACTIVE_DEFAULT, &defaults.inactive),
        ] {
            if !force && !spec.is_computed() && self.cache.contains(name) {
                continue;
            }
            let highlight = self.resolve_colors(&spec.get(), None)?;
            trace!(name, ?highlight, "registering default highlight");
            self.cache.insert(name.to_string(), highlight);
            self.host.define_highlight(name, &highlight);
        }
        Ok(())
    }

    fn resolve_colors(
        &self,
        colors: &HighlightColors,
        parent: Option<&Highlight>,
    ) -> Result<Highlight, ParseError> {
        let fallback = match parent {
            Some(parent) => *parent,
            None => self.palette.default_highlight()?,
        };
        let fg = match colors.fg.as_deref() {
            Some(fg) => self.palette.color(fg)?,
            None => fallback.fg,
        };
        let bg = match colors.bg.as_deref() {
            Some(bg) => self.palette.color(bg)?,
            None => fallback.bg,
        };
        let style = match colors.style.as_deref() {
            Some(style) => parse_style(style)?,
            None => fallback.style,
        };
        Ok(Highlight { fg, bg, style })
    }

    fn register(&mut self, name: &str, highlight: Highlight) {
        if self.cache.contains(name) {
            return;
        }
        trace!(name, ?highlight, "registering highlight");
        self.cache.insert(name.to_string(), highlight);
        self.host.define_highlight(name, &highlight);
    }
}

use tracing::trace;

use crate::component::Component;
use crate::component::ComponentIndex;
use crate::component::Decoration;
use crate::component::Separators;
use crate::deferred::Deferred;
use crate::error::ComponentError;
use crate::error::ParseError;
use crate::highlight::HighlightScope;
use crate::highlight::ResolvedHighlight;
use crate::host::WindowInfo;
use crate::markers;
use crate::palette::SeparatorPresets;
use crate::provider::ProviderContext;
use crate::provider::ProviderOutput;
use crate::provider::ProviderRegistry;
use crate::statusline::StatuslineKind;

/// Turns components into marker strings for one redraw.
pub(crate) struct SegmentParser<'a> {
    highlights: HighlightScope<'a>,
    providers: &'a ProviderRegistry,
    separators: &'a SeparatorPresets,
    window: &'a WindowInfo,
    kind: StatuslineKind,
}

impl<'a> SegmentParser<'a> {
    pub(crate) fn new(
        highlights: HighlightScope<'a>,
        providers: &'a ProviderRegistry,
        separators: &'a SeparatorPresets,
        window: &'a WindowInfo,
        kind: StatuslineKind,
    ) -> Self {
        Self {
            highlights,
            providers,
            separators,
            window,
            kind,
        }
    }

    /// Render `component`, reporting any failure to the host and standing
    /// in an empty segment for it.
    pub(crate) fn parse_or_report(
        &mut self,
        component: &Component,
        index: ComponentIndex,
        use_short: bool,
    ) -> String {
        match self.parse_component(component, use_short) {
            Ok(rendered) => rendered,
            Err(source) => {
                let error = ComponentError {
                    kind: self.kind,
                    index,
                    source,
                };
                self.highlights.host.report_error(&error);
                String::new()
            }
        }
    }

    pub(crate) fn measure(&self, rendered: &str) -> usize {
        if rendered.is_empty() {
            return 0;
        }
        self.highlights.host.measure_width(rendered)
    }

    pub(crate) fn parse_component(
        &mut self,
        component: &Component,
        use_short: bool,
    ) -> Result<String, ParseError> {
        if !component.is_enabled() {
            return Ok(String::new());
        }

        let spec = component.hl.as_ref().map(Deferred::get).unwrap_or_default();
        let parent = self.highlights.resolve_name(&spec, None)?;

        let provider = if use_short {
            component.short_provider.as_ref()
        } else {
            component.provider.as_ref()
        };
        let output = match provider {
            Some(provider) => self.providers.evaluate(
                provider,
                &ProviderContext {
                    component,
                    window: self.window,
                },
            )?,
            None => ProviderOutput::default(),
        };
        let is_empty = output.text.is_empty();
        trace!(name = ?component.name, use_short, is_empty, "parsed provider");

        let left = self.render_separators(component.left_sep.as_ref(), &parent, is_empty)?;
        let icon = match component.icon.as_ref().map(Deferred::get).or(output.icon) {
            Some(icon) => self.render_decoration(&icon, &icon.text, &parent, is_empty)?,
            None => String::new(),
        };
        let right = self.render_separators(component.right_sep.as_ref(), &parent, is_empty)?;

        if is_empty && left.is_empty() && icon.is_empty() && right.is_empty() {
            return Ok(String::new());
        }

        let mut rendered = left;
        rendered.push_str(&icon);
        if !is_empty {
            rendered.push_str(&markers::switch(&parent.name));
            rendered.push_str(&markers::escape(&output.text));
            rendered.push_str(markers::RESET);
        }
        rendered.push_str(&right);
        if !right.is_empty() || is_empty {
            rendered.push_str(markers::RESET);
        }
        Ok(rendered)
    }

    fn render_separators(
        &mut self,
        separators: Option<&Deferred<Separators>>,
        parent: &ResolvedHighlight,
        is_empty: bool,
    ) -> Result<String, ParseError> {
        let Some(separators) = separators.map(Deferred::get) else {
            return Ok(String::new());
        };
        let mut rendered = String::new();
        for separator in separators.iter() {
            let glyph = self.separators.resolve(&separator.text).to_string();
            rendered.push_str(&self.render_decoration(separator, &glyph, parent, is_empty)?);
        }
        Ok(rendered)
    }

    /// One icon or separator glyph preceded by its highlight switch.
    fn render_decoration(
        &mut self,
        decoration: &Decoration,
        glyph: &str,
        parent: &ResolvedHighlight,
        is_empty: bool,
    ) -> Result<String, ParseError> {
        if glyph.is_empty() || (is_empty && !decoration.always_visible) {
            return Ok(String::new());
        }
        let name = match decoration.hl.as_ref() {
            Some(spec) => {
                self.highlights
                    .resolve_name(spec, Some(&parent.highlight))?
                    .name
            }
            None => {
                let notch = self.highlights.notch(&parent.highlight)?;
                self.highlights.register_canonical(notch)
            }
        };
        let mut rendered = markers::switch(&name);
        rendered.push_str(&markers::escape(glyph));
        Ok(rendered)
    }
}

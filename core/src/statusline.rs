use std::fmt;

use tracing::debug;
use tracing::warn;

use crate::component::ComponentIndex;
use crate::config::Config;
use crate::fitter;
use crate::fitter::ComponentWrapper;
use crate::highlight::HighlightCache;
use crate::highlight::HighlightRegistry;
use crate::highlight::HighlightScope;
use crate::host::Host;
use crate::markers;
use crate::parser::SegmentParser;
use crate::provider::ProviderRegistry;

/// Which component set a redraw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatuslineKind {
    Active,
    Inactive,
}

impl fmt::Display for StatuslineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatuslineKind::Active => f.write_str("active"),
            StatuslineKind::Inactive => f.write_str("inactive"),
        }
    }
}

/// Renders one window's statusline against a [`Host`].
///
/// The highlight cache is the only state kept between redraws. Share a
/// `Statusline` across threads by wrapping it in a `Mutex`.
pub struct Statusline<H> {
    host: H,
    config: Config,
    providers: ProviderRegistry,
    highlights: Box<dyn HighlightCache>,
}

impl<H: Host> Statusline<H> {
    pub fn new(host: H, config: Config) -> Self {
        Self {
            host,
            config,
            providers: ProviderRegistry::with_builtins(),
            highlights: Box::new(HighlightRegistry::default()),
        }
    }

    pub fn with_providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_highlight_cache(mut self, cache: Box<dyn HighlightCache>) -> Self {
        self.highlights = cache;
        self
    }

    pub fn providers_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.providers
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swap in a new configuration.
    ///
    /// Canonical highlight names encode their resolved colors, so the cache
    /// stays valid. Only the two window defaults are redefined from the new
    /// configuration.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
        let mut scope = HighlightScope::new(
            self.highlights.as_mut(),
            &mut self.host,
            &self.config.theme,
        );
        if let Err(err) = scope.redefine_defaults(&self.config.default_hl) {
            warn!("failed to register default statusline highlights: {err}");
        }
    }

    pub fn highlights(&self) -> &dyn HighlightCache {
        self.highlights.as_ref()
    }

    /// Produce the marker string for the host's current window.
    pub fn render(&mut self, window_is_active: bool) -> String {
        let window = self.host.window().clone();
        let Self {
            host,
            config,
            providers,
            highlights,
        } = self;

        let mut scope = HighlightScope::new(highlights.as_mut(), host, &config.theme);
        if let Err(err) = scope.regenerate_defaults(&config.default_hl) {
            warn!("failed to register default statusline highlights: {err}");
        }

        if !config.has_components() || config.disable.matches(&window.buffer) {
            return String::new();
        }

        let kind = if window_is_active && !config.force_inactive.matches(&window.buffer) {
            StatuslineKind::Active
        } else {
            StatuslineKind::Inactive
        };
        let sections = config.sections(kind);
        if sections.iter().all(|section| section.components.is_empty()) {
            return String::new();
        }

        let mut parser = SegmentParser::new(scope, providers, &config.separators, &window, kind);
        let mut wrappers = Vec::new();
        for (s, section) in sections.iter().enumerate() {
            for (c, component) in section.components.iter().enumerate() {
                let index = ComponentIndex {
                    section: s,
                    component: c,
                };
                let rendered = parser.parse_or_report(component, index, false);
                let width = parser.measure(&rendered);
                wrappers.push(ComponentWrapper {
                    component,
                    rendered,
                    width,
                    index,
                });
            }
        }

        let total: usize = wrappers.iter().map(|wrapper| wrapper.width).sum();
        debug!(%kind, total, budget = window.width, "rendering statusline");
        if total > window.width {
            let fitted = fitter::fit(&mut wrappers, window.width, |wrapper| {
                let rendered = parser.parse_or_report(wrapper.component, wrapper.index, true);
                let width = parser.measure(&rendered);
                (rendered, width)
            });
            debug!(%kind, fitted, budget = window.width, "fitted statusline");
        }

        let mut rendered = vec![String::new(); sections.len()];
        for wrapper in wrappers {
            if let Some(section) = rendered.get_mut(wrapper.index.section) {
                section.push_str(&wrapper.rendered);
            }
        }
        rendered.join(markers::ALIGN)
    }
}

impl<H: fmt::Debug> fmt::Debug for Statusline<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statusline")
            .field("host", &self.host)
            .field("providers", &self.providers)
            .field("highlights", &self.highlights.len())
            .finish_non_exhaustive()
    }
}

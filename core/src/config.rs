//! Statusline configuration and its TOML form.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::component::Component;
use crate::component::Decoration;
use crate::component::Section;
use crate::deferred::Deferred;
use crate::error::ConfigError;
use crate::highlight::HighlightColors;
use crate::palette::Palette;
use crate::palette::SeparatorPresets;
use crate::policy::BufferPolicy;
use crate::provider::Provider;
use crate::provider::ProviderOptions;
use crate::statusline::StatuslineKind;

const CONFIG_DIR: &str = "linebar";
const CONFIG_FILE: &str = "config.toml";

/// Everything a [`Statusline`](crate::Statusline) draws from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Named colors, layered over the default theme.
    pub theme: Palette,
    pub separators: SeparatorPresets,
    pub default_hl: DefaultHighlights,
    /// Buffers that get no statusline at all.
    pub disable: BufferPolicy,
    /// Buffers drawn with the inactive layout even when focused.
    pub force_inactive: BufferPolicy,
    pub active: Vec<Section>,
    pub inactive: Vec<Section>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Palette::default(),
            separators: SeparatorPresets::default(),
            default_hl: DefaultHighlights::default(),
            disable: BufferPolicy::default(),
            force_inactive: BufferPolicy::default_force_inactive(),
            active: Vec::new(),
            inactive: Vec::new(),
        }
    }
}

/// Base highlights of the active and inactive statuslines, registered as
/// `StatusLine` and `StatusLineNC`. Computed values are re-registered on
/// every redraw.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultHighlights {
    pub active: Deferred<HighlightColors>,
    pub inactive: Deferred<HighlightColors>,
}

impl Default for DefaultHighlights {
    fn default() -> Self {
        Self {
            active: HighlightColors::new().fg("fg").bg("bg").into(),
            inactive: HighlightColors::new().fg("fg").bg("bg").into(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        debug!(path = %path.display(), "loaded statusline config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// `$XDG_CONFIG_HOME/linebar/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the user's config, or the built-in layout when there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no user config, using built-in layout");
                Ok(Self::builtin())
            }
        }
    }

    pub fn has_components(&self) -> bool {
        [&self.active, &self.inactive]
            .into_iter()
            .flatten()
            .any(|section| !section.components.is_empty())
    }

    pub fn sections(&self, kind: StatuslineKind) -> &[Section] {
        match kind {
            StatuslineKind::Active => &self.active,
            StatuslineKind::Inactive => &self.inactive,
        }
    }

    /// The stock two-section layout: mode, file and position on the left,
    /// repository and scroll state on the right.
    pub fn builtin() -> Self {
        let block_hl = |bg: &str| Decoration::new("block").with_hl(HighlightColors::new().fg(bg));
        let pad = |bg: &str| Decoration::new(" ").with_hl(HighlightColors::new().bg(bg));

        let mut short_path = ProviderOptions::new();
        short_path.insert("type".to_string(), "short-path".into());

        let left = Section::new(vec![
            Component::new("vi_mode")
                .named("mode")
                .with_hl(HighlightColors::new().fg("bg").bg("skyblue").style("bold"))
                .with_left_sep(block_hl("skyblue"))
                .with_right_sep(block_hl("skyblue"))
                .with_priority(10),
            Component::new(Provider::configured("file_info", short_path))
                .named("file")
                .with_short_provider("file_info")
                .with_hl(HighlightColors::new().fg("white").bg("oceanblue").style("bold"))
                .with_left_sep(vec![
                    Decoration::new("slant_left_2"),
                    pad("oceanblue"),
                ])
                .with_right_sep(vec![
                    pad("oceanblue"),
                    Decoration::new("slant_right_2"),
                    Decoration::new(" "),
                ])
                .with_priority(5),
            Component::new("position")
                .named("position")
                .with_right_sep(Decoration::new(" ")),
            Component::new("line_percentage")
                .named("percentage")
                .with_hl(HighlightColors::new().style("bold"))
                .with_right_sep(Decoration::new(" "))
                .with_priority(-1)
                .truncate_hide(),
        ]);

        let right = Section::new(vec![
            Component::new("git_branch")
                .named("branch")
                .with_hl(HighlightColors::new().fg("white").bg("black").style("bold"))
                .with_right_sep(pad("black"))
                .with_priority(-2)
                .truncate_hide(),
            Component::new("file_type")
                .named("filetype")
                .with_hl(HighlightColors::new().fg("white").bg("bg"))
                .with_left_sep(Decoration::new(" "))
                .with_right_sep(Decoration::new(" "))
                .with_priority(-3)
                .truncate_hide(),
            Component::new("scroll_bar")
                .named("scroll")
                .with_hl(HighlightColors::new().fg("skyblue").style("bold"))
                .with_priority(-1)
                .truncate_hide(),
        ]);

        let inactive = Section::new(vec![
            Component::new("file_type")
                .named("filetype")
                .with_hl(HighlightColors::new().fg("white").bg("oceanblue").style("bold"))
                .with_left_sep(Decoration::new(" ").with_hl(HighlightColors::new().bg("oceanblue")))
                .with_right_sep(vec![
                    pad("oceanblue"),
                    Decoration::new("slant_right"),
                ]),
        ]);

        Self {
            active: vec![left, right],
            inactive: vec![inactive],
            ..Self::default()
        }
    }
}

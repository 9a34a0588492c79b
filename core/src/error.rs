use std::path::PathBuf;

use thiserror::Error;

use crate::component::ComponentIndex;
use crate::statusline::StatuslineKind;

/// Failure while turning one component into its rendered string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The provider evaluated to something other than text. This is a
    /// configuration mistake rather than a runtime failure.
    #[error("provider must evaluate to text, got {found} instead")]
    ProviderNotText { found: String },

    #[error("no provider named `{0}` is registered")]
    UnknownProvider(String),

    #[error("provider `{provider}` failed: {source}")]
    Provider {
        provider: String,
        #[source]
        source: ProviderError,
    },

    #[error("provider `{provider}` panicked: {message}")]
    ProviderPanicked { provider: String, message: String },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("invalid highlight style `{0}`")]
    InvalidStyle(String),
}

impl ParseError {
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ParseError::ProviderNotText { .. })
    }
}

/// Errors a provider function may return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("produced {found} instead of text")]
    NotText { found: String },

    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("{0}")]
    Failed(String),
}

/// A [`ParseError`] tagged with where it happened. This is what the host's
/// error channel receives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} statusline, {index}: {source}")]
pub struct ComponentError {
    pub kind: StatuslineKind,
    pub index: ComponentIndex,
    #[source]
    pub source: ParseError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config{}: {source}", location(.path.as_ref()))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },
}

fn location(path: Option<&PathBuf>) -> String {
    path.map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}

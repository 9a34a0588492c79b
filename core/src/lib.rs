//! Declarative single-line statusline engine.
//!
//! A statusline is a set of [`Component`]s grouped into sections. Every
//! redraw parses each component into a marker string (see [`markers`]),
//! measures it through the [`Host`], and, when the line is wider than the
//! window, degrades low-priority components to their short form or hides
//! them. Highlights are registered with the host once per distinct
//! color/style triple and reused across redraws.

pub mod component;
pub mod config;
pub mod deferred;
mod error;
pub mod fitter;
pub mod highlight;
pub mod host;
pub mod markers;
pub mod palette;
mod parser;
pub mod policy;
pub mod provider;
pub mod providers;
mod statusline;

pub use component::Component;
pub use component::ComponentIndex;
pub use component::Decoration;
pub use component::Section;
pub use component::Separators;
pub use config::Config;
pub use config::DefaultHighlights;
pub use deferred::Deferred;
pub use error::ComponentError;
pub use error::ConfigError;
pub use error::ParseError;
pub use error::ProviderError;
pub use highlight::Highlight;
pub use highlight::HighlightCache;
pub use highlight::HighlightColors;
pub use highlight::HighlightRegistry;
pub use highlight::HighlightSpec;
pub use host::BufferInfo;
pub use host::Host;
pub use host::Mode;
pub use host::WindowInfo;
pub use palette::Palette;
pub use palette::SeparatorPresets;
pub use policy::BufferPolicy;
pub use provider::Provider;
pub use provider::ProviderContext;
pub use provider::ProviderOptions;
pub use provider::ProviderOutput;
pub use provider::ProviderRegistry;
pub use statusline::Statusline;
pub use statusline::StatuslineKind;

//! Providers produce the text a component shows.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error as _;

use crate::component::Component;
use crate::component::Decoration;
use crate::error::ParseError;
use crate::error::ProviderError;
use crate::host::WindowInfo;

/// Options passed to a provider, as written in an inline provider table.
pub type ProviderOptions = toml::Table;

/// What a provider hands back: the text and, optionally, an icon used when
/// the component doesn't declare its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderOutput {
    pub text: String,
    pub icon: Option<Decoration>,
}

impl ProviderOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<Decoration>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Everything a provider may look at.
#[derive(Debug, Clone, Copy)]
pub struct ProviderContext<'a> {
    pub component: &'a Component,
    pub window: &'a WindowInfo,
}

pub type ProviderFn = Arc<
    dyn Fn(&ProviderContext<'_>, &ProviderOptions) -> Result<ProviderOutput, ProviderError>
        + Send
        + Sync,
>;

/// How a component names its provider.
#[derive(Clone)]
pub enum Provider {
    /// A registered provider called with no options. A name nothing is
    /// registered under is shown as literal text.
    Named(String),
    /// A closure supplied in code.
    Inline(ProviderFn),
    /// `{ name = "...", opts = { ... } }`: a registered provider with options.
    Configured {
        name: String,
        opts: ProviderOptions,
    },
    /// A config value of the wrong shape, kept so the failure is reported
    /// against the component at render time rather than rejecting the file.
    Invalid(String),
}

impl Provider {
    pub fn inline<F>(f: F) -> Self
    where
        F: Fn(&ProviderContext<'_>, &ProviderOptions) -> Result<ProviderOutput, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        Provider::Inline(Arc::new(f))
    }

    pub fn configured(name: impl Into<String>, opts: ProviderOptions) -> Self {
        Provider::Configured {
            name: name.into(),
            opts,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Provider::Inline(_) => f.write_str("Inline(..)"),
            Provider::Configured { name, opts } => f
                .debug_struct("Configured")
                .field("name", name)
                .field("opts", opts)
                .finish(),
            Provider::Invalid(found) => f.debug_tuple("Invalid").field(found).finish(),
        }
    }
}

impl From<&str> for Provider {
    fn from(name: &str) -> Self {
        Provider::Named(name.to_string())
    }
}

impl From<String> for Provider {
    fn from(name: String) -> Self {
        Provider::Named(name)
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match toml::Value::deserialize(deserializer)? {
            toml::Value::String(name) => Ok(Provider::Named(name)),
            toml::Value::Table(mut table) => {
                let name = match table.remove("name") {
                    Some(toml::Value::String(name)) => name,
                    Some(other) => {
                        return Ok(Provider::Invalid(format!(
                            "a table whose name is {}",
                            other.type_str()
                        )));
                    }
                    None => return Err(D::Error::missing_field("name")),
                };
                let opts = match table.remove("opts") {
                    Some(toml::Value::Table(opts)) => opts,
                    Some(other) => {
                        return Err(D::Error::custom(format!(
                            "provider opts must be a table, got {}",
                            other.type_str()
                        )));
                    }
                    None => ProviderOptions::new(),
                };
                if let Some(key) = table.keys().next() {
                    return Err(D::Error::unknown_field(key, &["name", "opts"]));
                }
                Ok(Provider::Configured { name, opts })
            }
            other => Ok(Provider::Invalid(other.type_str().to_string())),
        }
    }
}

/// Providers by name. Later registrations replace earlier ones, so user
/// providers shadow the built-ins.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderFn>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::providers::register_builtins(&mut registry);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, provider: F)
    where
        F: Fn(&ProviderContext<'_>, &ProviderOptions) -> Result<ProviderOutput, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        self.providers.insert(name.into(), Arc::new(provider));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Run `provider` for the component in `ctx`. A provider that panics is
    /// reported as [`ParseError::ProviderPanicked`].
    pub fn evaluate(
        &self,
        provider: &Provider,
        ctx: &ProviderContext<'_>,
    ) -> Result<ProviderOutput, ParseError> {
        let empty = ProviderOptions::new();
        let (label, f, opts) = match provider {
            Provider::Named(name) => match self.providers.get(name) {
                Some(f) => (name.as_str(), f, &empty),
                None => return Ok(ProviderOutput::text(name.clone())),
            },
            Provider::Inline(f) => ("<inline>", f, &empty),
            Provider::Configured { name, opts } => match self.providers.get(name) {
                Some(f) => (name.as_str(), f, opts),
                None => return Err(ParseError::UnknownProvider(name.clone())),
            },
            Provider::Invalid(found) => {
                return Err(ParseError::ProviderNotText {
                    found: found.clone(),
                });
            }
        };
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(ctx, opts))).map_err(|payload| {
            ParseError::ProviderPanicked {
                provider: label.to_string(),
                message: panic_message(payload.as_ref()),
            }
        })?;
        result.map_err(|source| match source {
            ProviderError::NotText { found } => ParseError::ProviderNotText { found },
            source => ParseError::Provider {
                provider: label.to_string(),
                source,
            },
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.providers.keys()).finish()
    }
}

//! Providers registered by [`ProviderRegistry::with_builtins`].

use chrono::Local;
use chrono::format::Item;
use chrono::format::StrftimeItems;

use crate::component::Decoration;
use crate::error::ProviderError;
use crate::highlight::HighlightColors;
use crate::provider::ProviderContext;
use crate::provider::ProviderOptions;
use crate::provider::ProviderOutput;
use crate::provider::ProviderRegistry;

mod cursor;
mod file;
mod mode;

const GIT_BRANCH_ICON: &str = "\u{e0a0} ";
const DEFAULT_CLOCK_FORMAT: &str = "%H:%M";

pub(crate) fn register_builtins(registry: &mut ProviderRegistry) {
    registry.register("vi_mode", mode::vi_mode);
    registry.register("file_info", file::file_info);
    registry.register("file_type", file::file_type);
    registry.register("file_encoding", file::file_encoding);
    registry.register("position", cursor::position);
    registry.register("line_percentage", cursor::line_percentage);
    registry.register("scroll_bar", cursor::scroll_bar);
    registry.register("git_branch", git_branch);
    registry.register("clock", clock);
}

fn git_branch(
    ctx: &ProviderContext<'_>,
    _opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    let Some(branch) = ctx.window.buffer.git_branch.as_deref() else {
        return Ok(ProviderOutput::default());
    };
    Ok(ProviderOutput::text(branch).with_icon(
        Decoration::new(GIT_BRANCH_ICON).with_hl(HighlightColors::new()),
    ))
}

fn clock(
    _ctx: &ProviderContext<'_>,
    opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    let format = opt_str(opts, "format")?.unwrap_or(DEFAULT_CLOCK_FORMAT);
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ProviderError::InvalidOption {
            option: "format".to_string(),
            reason: format!("`{format}` is not a valid strftime format"),
        });
    }
    Ok(ProviderOutput::text(Local::now().format(format).to_string()))
}

/// Read a string option. A present value of another type is an error.
pub(crate) fn opt_str<'a>(
    opts: &'a ProviderOptions,
    key: &str,
) -> Result<Option<&'a str>, ProviderError> {
    match opts.get(key) {
        None => Ok(None),
        Some(toml::Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(invalid_type(key, "a string", other)),
    }
}

pub(crate) fn opt_bool(opts: &ProviderOptions, key: &str) -> Result<Option<bool>, ProviderError> {
    match opts.get(key) {
        None => Ok(None),
        Some(toml::Value::Boolean(value)) => Ok(Some(*value)),
        Some(other) => Err(invalid_type(key, "a boolean", other)),
    }
}

fn invalid_type(key: &str, expected: &str, found: &toml::Value) -> ProviderError {
    ProviderError::InvalidOption {
        option: key.to_string(),
        reason: format!("expected {expected}, got {}", found.type_str()),
    }
}

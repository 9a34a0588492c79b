use crate::error::ProviderError;
use crate::provider::ProviderContext;
use crate::provider::ProviderOptions;
use crate::provider::ProviderOutput;

use super::opt_bool;

const VIM_GLYPH: &str = "\u{e7c5}";

pub(super) fn vi_mode(
    ctx: &ProviderContext<'_>,
    opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    if opt_bool(opts, "show_mode_name")?.unwrap_or(true) {
        Ok(ProviderOutput::text(ctx.window.buffer.mode.to_string()))
    } else {
        Ok(ProviderOutput::text(VIM_GLYPH))
    }
}

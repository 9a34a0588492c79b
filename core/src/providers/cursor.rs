//! Cursor position providers.

use crate::error::ProviderError;
use crate::provider::ProviderContext;
use crate::provider::ProviderOptions;
use crate::provider::ProviderOutput;

use super::opt_bool;

const SCROLL_BLOCKS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

pub(super) fn position(
    ctx: &ProviderContext<'_>,
    opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    let buffer = &ctx.window.buffer;
    let (line, column) = (buffer.line, buffer.column);
    let text = if opt_bool(opts, "padding")?.unwrap_or(false) {
        format!("{line:>3}:{column:<2}")
    } else {
        format!("{line}:{column}")
    };
    Ok(ProviderOutput::text(text))
}

pub(super) fn line_percentage(
    ctx: &ProviderContext<'_>,
    _opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    let buffer = &ctx.window.buffer;
    let lines = buffer.line_count.max(1);
    let text = if buffer.line <= 1 {
        "Top".to_string()
    } else if buffer.line >= lines {
        "Bot".to_string()
    } else {
        let percent = widened(buffer.line, 99).div_ceil(lines as u128);
        format!("{percent:2}%")
    };
    Ok(ProviderOutput::text(text))
}

pub(super) fn scroll_bar(
    ctx: &ProviderContext<'_>,
    _opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    let buffer = &ctx.window.buffer;
    let lines = buffer.line_count.max(1);
    let last = SCROLL_BLOCKS.len() - 1;
    let index = widened(buffer.line.min(lines), last) / lines as u128;
    let index = usize::try_from(index).map_or(last, |index| index.min(last));
    Ok(ProviderOutput::text(SCROLL_BLOCKS[index].repeat(2)))
}

/// Line numbers can be anywhere up to `usize::MAX`, so scale in 128 bits.
fn widened(value: usize, factor: usize) -> u128 {
    value as u128 * factor as u128
}

//! The boundary between the statusline engine and whatever paints it.

use strum_macros::Display;
use strum_macros::EnumString;

use crate::error::ComponentError;
use crate::highlight::Highlight;
use crate::markers;

/// Services the render pipeline needs from the program that displays the
/// statusline.
pub trait Host {
    /// Display width of a rendered segment. Markers must not count.
    fn measure_width(&self, segment: &str) -> usize {
        markers::display_width(segment)
    }

    /// Register `name` so later `%#name#` markers paint with `highlight`.
    /// Called at most once per name unless the name is a window default.
    fn define_highlight(&mut self, name: &str, highlight: &Highlight);

    /// The window being drawn and the buffer it shows.
    fn window(&self) -> &WindowInfo;

    /// A component failed to render. The redraw carries on without it.
    fn report_error(&mut self, error: &ComponentError) {
        tracing::error!("statusline component failed: {error}");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowInfo {
    /// Width in display cells; the truncation budget.
    pub width: usize,
    pub buffer: BufferInfo,
}

/// Facts about the displayed buffer read by providers and buffer policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferInfo {
    pub name: String,
    pub filetype: String,
    pub buftype: String,
    pub mode: Mode,
    /// 1-based cursor line.
    pub line: usize,
    /// 1-based cursor column.
    pub column: usize,
    pub line_count: usize,
    pub git_branch: Option<String>,
    pub modified: bool,
    pub readonly: bool,
    pub encoding: String,
}

impl Default for BufferInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            filetype: String::new(),
            buftype: String::new(),
            mode: Mode::Normal,
            line: 1,
            column: 1,
            line_count: 1,
            git_branch: None,
            modified: false,
            readonly: false,
            encoding: "utf-8".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    #[default]
    #[strum(to_string = "NORMAL", serialize = "n")]
    Normal,
    #[strum(to_string = "INSERT", serialize = "i")]
    Insert,
    #[strum(to_string = "VISUAL", serialize = "v")]
    Visual,
    #[strum(to_string = "LINES", serialize = "v-line", serialize = "visual-line")]
    VisualLine,
    #[strum(to_string = "BLOCK", serialize = "v-block", serialize = "visual-block")]
    VisualBlock,
    #[strum(to_string = "REPLACE", serialize = "r")]
    Replace,
    #[strum(to_string = "COMMAND", serialize = "c")]
    Command,
    #[strum(to_string = "TERMINAL", serialize = "t")]
    Terminal,
    #[strum(to_string = "SELECT", serialize = "s")]
    Select,
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_parses_short_and_long_names() {
        assert_eq!("insert".parse::<Mode>(), Ok(Mode::Insert));
        assert_eq!("INSERT".parse::<Mode>(), Ok(Mode::Insert));
        assert_eq!("v-line".parse::<Mode>(), Ok(Mode::VisualLine));
        assert_eq!("t".parse::<Mode>(), Ok(Mode::Terminal));
        assert!("sideways".parse::<Mode>().is_err());
    }

    #[test]
    fn mode_displays_statusline_label() {
        assert_eq!(Mode::VisualBlock.to_string(), "BLOCK");
        assert_eq!(Mode::default().to_string(), "NORMAL");
    }

    #[test]
    fn default_measure_excludes_markers() {
        let host = testing::TestHost::with_width(10);
        assert_eq!(host.measure_width("%#X#abc%*"), 3);
    }
}

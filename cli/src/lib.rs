//! Command-line front end: render one statusline for a described window.

use std::io;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use linebar_core::BufferInfo;
use linebar_core::Config;
use linebar_core::Mode;
use linebar_core::Statusline;
use linebar_core::WindowInfo;
use tracing_subscriber::EnvFilter;

mod terminal;

pub use terminal::TerminalHost;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "LINEBAR_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";
const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Parser)]
#[command(name = "linebar", version, about = "Render a statusline for a described window")]
pub struct Cli {
    /// Config file. Defaults to the user config, or the built-in layout.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Width budget in cells. Defaults to the terminal width.
    #[arg(long)]
    pub width: Option<u16>,

    /// Render as an unfocused window.
    #[arg(long)]
    pub inactive: bool,

    /// Path of the displayed buffer.
    #[arg(long, default_value = "")]
    pub file: String,

    #[arg(long, default_value = "")]
    pub filetype: String,

    #[arg(long, default_value = "")]
    pub buftype: String,

    #[arg(long, default_value = "normal")]
    pub mode: Mode,

    #[arg(long, default_value_t = 1)]
    pub line: usize,

    #[arg(long = "col", default_value_t = 1)]
    pub column: usize,

    /// Number of lines in the buffer.
    #[arg(long = "lines", default_value_t = 1)]
    pub line_count: usize,

    #[arg(long)]
    pub branch: Option<String>,

    #[arg(long)]
    pub modified: bool,

    #[arg(long)]
    pub readonly: bool,

    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Print the marker string instead of ANSI output.
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    pub fn window(&self, width: usize) -> WindowInfo {
        WindowInfo {
            width,
            buffer: BufferInfo {
                name: self.file.clone(),
                filetype: self.filetype.clone(),
                buftype: self.buftype.clone(),
                mode: self.mode,
                line: self.line,
                column: self.column,
                line_count: self.line_count,
                git_branch: self.branch.clone(),
                modified: self.modified,
                readonly: self.readonly,
                encoding: self.encoding.clone(),
            },
        }
    }

    fn budget(&self) -> usize {
        match self.width {
            Some(width) => usize::from(width),
            None => crossterm::terminal::size()
                .map(|(columns, _)| usize::from(columns))
                .unwrap_or(FALLBACK_WIDTH),
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => Config::load_default().context("failed to load default config"),
        }
    }
}

/// Log to stderr so stdout carries only the statusline.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let window_is_active = !cli.inactive;
    let host = TerminalHost::new(cli.window(cli.budget()));
    let mut statusline = Statusline::new(host, config);

    let rendered = statusline.render(window_is_active);
    tracing::debug!(rendered = %rendered, "rendered statusline");

    let mut stdout = io::stdout().lock();
    if cli.raw {
        writeln!(stdout, "{rendered}")?;
    } else {
        let line = statusline.host().to_line(&rendered, window_is_active);
        statusline.host().write_ansi(&mut stdout, &line)?;
        writeln!(stdout)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn window_facts_come_from_arguments() {
        let cli = Cli::try_parse_from([
            "linebar",
            "--file",
            "src/lib.rs",
            "--mode",
            "insert",
            "--col",
            "7",
            "--lines",
            "300",
            "--branch",
            "main",
            "--modified",
        ])
        .unwrap();

        let window = cli.window(60);

        assert_eq!(window.width, 60);
        assert_eq!(window.buffer.name, "src/lib.rs");
        assert_eq!(window.buffer.mode, Mode::Insert);
        assert_eq!(window.buffer.line, 1);
        assert_eq!(window.buffer.column, 7);
        assert_eq!(window.buffer.line_count, 300);
        assert_eq!(window.buffer.git_branch.as_deref(), Some("main"));
        assert!(window.buffer.modified);
        assert!(!window.buffer.readonly);
        assert_eq!(window.buffer.encoding, "utf-8");
    }

    #[test]
    fn version_comes_from_the_package() {
        assert_eq!(
            Cli::command().get_version(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn explicit_width_wins() {
        let cli = Cli::try_parse_from(["linebar", "--width", "33"]).unwrap();
        assert_eq!(cli.budget(), 33);
    }

    #[test]
    fn bad_mode_is_rejected() {
        assert!(Cli::try_parse_from(["linebar", "--mode", "sideways"]).is_err());
    }

    #[test]
    fn builtin_layout_paints_full_width() {
        let cli = Cli::try_parse_from(["linebar", "--file", "a.rs", "--filetype", "rust"]).unwrap();
        let mut statusline = Statusline::new(TerminalHost::new(cli.window(70)), Config::builtin());

        let rendered = statusline.render(true);
        let line = statusline.host().to_line(&rendered, true);

        assert_eq!(line.width(), 70);
    }
}

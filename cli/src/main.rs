use clap::Parser;
use linebar_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    linebar_cli::init_tracing()?;
    linebar_cli::run(cli)
}

use clap::Parser;
use tracing::debug;

use tax_cli::cli::{Cli, execute};
use tax_cli::logging::init_logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    init_logging(settings.log_level.as_deref(), settings.log_file.as_deref())?;
    debug!(?settings, "starting");

    let output = execute(&cli.command, &settings, cli.json)?;
    println!("{output}");

    Ok(())
}

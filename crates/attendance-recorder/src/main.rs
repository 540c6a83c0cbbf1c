mod bootstrap;
mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    bootstrap::setup_logging(cli.debug)?;

    tracing::debug!("attendance-recorder v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Import {
            file,
            source,
            delimiter,
        } => commands::run_import(&cli.store, &file, source.as_deref(), delimiter),
        Command::Profiles => commands::run_profiles(&cli.store),
        Command::Table => commands::run_table(&cli.store),
        Command::Summary => commands::run_summary(&cli.store),
        Command::History { email } => commands::run_history(&cli.store, &email),
        Command::Export { output } => commands::run_export(&cli.store, output.as_deref()),
    }
}

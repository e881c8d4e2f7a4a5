//! Gauge CLI
//!
//! Shows, parses and converts rocket design values using the unit groups
//! from `gauge-units`. Default units persist between runs in a JSON
//! preferences file.

mod cli;
mod commands;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use commands::{load_preferences, save_preferences, CliError};
use gauge_units::Registry;

fn run(cli: &Cli) -> Result<String, CliError> {
    let registry = Registry::new();
    load_preferences(&registry, &cli.prefs)?;

    let output = cli.command.execute(&registry)?;
    if cli.command.changes_defaults() {
        save_preferences(&registry, &cli.prefs)?;
    }
    Ok(output)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries command output only
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(command = ?cli.command, prefs = %cli.prefs.display(), "starting");

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[{}] {}", e.code(), e);
            ExitCode::FAILURE
        }
    }
}

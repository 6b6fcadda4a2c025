pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;

use std::io::Write;

use anyhow::{Context, Result};
use rental_core::TaxSettings;
use rental_data::{load_settings, with_bracket_file};
use tracing::{debug, info};

use crate::cli::{Cli, Command};

/// Builds the tax settings from the global options: the settings file or
/// the built-in defaults, then the bracket file if one is given.
pub fn resolve_settings(cli: &Cli) -> Result<TaxSettings> {
    let settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => TaxSettings::default(),
    };

    match &cli.brackets {
        Some(path) => with_bracket_file(settings, path)
            .with_context(|| format!("Failed to load brackets: {}", path.display())),
        None => Ok(settings),
    }
}

/// Runs the parsed command line, writing the result to `out`.
pub async fn run<W: Write>(
    cli: Cli,
    out: &mut W,
) -> Result<()> {
    info!(command = cli.command.name(), "Running");

    let settings = resolve_settings(&cli)?;
    debug!(tax_year = settings.tax_year, "Tax settings ready");

    match &cli.command {
        Command::Simulate(args) => commands::simulate::run(args, &settings, cli.output, out),
        Command::Compare(args) => commands::compare::run(args, settings, cli.output, out).await,
        Command::Loan(args) => commands::loan::run(args, cli.output, out),
        Command::Depreciation(args) => commands::depreciation::run(args, cli.output, out),
    }
}

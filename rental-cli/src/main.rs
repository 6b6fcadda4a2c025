use std::io;

use clap::Parser;

use rental_cli::cli::Cli;
use rental_cli::logging;

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    rental_cli::run(cli, &mut out).await
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rental_core::calculations::build_loan_schedule;
use rental_data::{TaxBracketLoader, load_input, load_settings};

/// Validate simulation input, settings and bracket files without running a
/// projection.
///
/// Each file given is parsed and range-checked; the first problem found is
/// reported and the process exits with a non-zero status.
#[derive(Parser, Debug)]
#[command(name = "rental-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Simulation input (.toml or .json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Tax settings (.toml)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Income-tax bracket table (.csv with min_income,max_income,rate)
    #[arg(short, long)]
    brackets: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.input.is_none() && args.settings.is_none() && args.brackets.is_none() {
        anyhow::bail!("nothing to check: pass --input, --settings or --brackets");
    }

    if let Some(path) = &args.settings {
        let settings = load_settings(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?;
        println!(
            "{}: tax year {}, {} income brackets",
            path.display(),
            settings.tax_year,
            settings.income_brackets.len()
        );
    }

    if let Some(path) = &args.brackets {
        let brackets = TaxBracketLoader::load_file(path)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        println!("{}: {} income brackets", path.display(), brackets.len());
    }

    if let Some(path) = &args.input {
        let input = load_input(path)
            .with_context(|| format!("Failed to load input: {}", path.display()))?;
        let principal = input.acquisition.loan_principal();
        let schedule = build_loan_schedule(principal, &input.loan)
            .with_context(|| format!("Inconsistent loan terms in {}", path.display()))?;
        println!(
            "{}: loan principal {}, monthly payment {}",
            path.display(),
            principal.round_dp(2),
            schedule.monthly_payment().round_dp(2)
        );
    }

    println!("All files are valid.");

    Ok(())
}

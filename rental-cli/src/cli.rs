use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rental_core::Regime;

use crate::output::OutputFormat;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Ten-year tax and cashflow projection of a rental property under the
/// French letting regimes.
///
/// Reads the property description from a TOML or JSON input file and
/// prints the projection, a regime comparison, the loan schedule or the
/// depreciation plan.
#[derive(Debug, Parser)]
#[command(name = "rental-sim", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Tax settings file (TOML). Built-in defaults otherwise.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Income-tax bracket table (CSV) replacing the one of the settings.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    /// Append log records to this file as well as stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project one regime over ten years
    Simulate(SimulateArgs),
    /// Summarise several regimes side by side
    Compare(CompareArgs),
    /// Print the loan amortization schedule
    Loan(LoanArgs),
    /// Print the depreciation plan
    Depreciation(InputArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simulate(_) => "simulate",
            Self::Compare(_) => "compare",
            Self::Loan(_) => "loan",
            Self::Depreciation(_) => "depreciation",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Simulation input file (.toml or .json)
    #[arg(short, long)]
    pub input: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Regime, e.g. lmnp-reel, micro-foncier, sci-is
    #[arg(short, long, value_parser = parse_regime)]
    pub regime: Regime,
}

#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Regimes to compare, repeatable. All nine when omitted.
    #[arg(short, long = "regime", value_parser = parse_regime)]
    pub regimes: Vec<Regime>,
}

#[derive(Debug, Clone, Args)]
pub struct LoanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// One row per year instead of per month
    #[arg(long)]
    pub yearly: bool,
}

/// Parses a regime from its kebab-case identifier.
pub fn parse_regime(s: &str) -> Result<Regime, String> {
    Regime::parse(&s.to_ascii_lowercase()).ok_or_else(|| {
        let known: Vec<&str> = Regime::ALL.iter().map(Regime::as_str).collect();
        format!("unknown regime '{s}', expected one of: {}", known.join(", "))
    })
}

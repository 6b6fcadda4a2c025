use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use rental_core::{Regime, SimulationReport, TaxSettings, simulate};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::CompareArgs;
use crate::commands::read_input;
use crate::output::{OutputFormat, write_rows};

#[derive(Debug, Serialize, Tabled)]
pub struct RegimeSummary {
    #[tabled(rename = "Regime")]
    pub regime: String,
    #[tabled(rename = "Total tax")]
    pub total_tax: Decimal,
    #[tabled(rename = "Total cashflow")]
    pub total_cashflow: Decimal,
    #[tabled(rename = "Avg monthly cashflow")]
    pub average_monthly_cashflow: Decimal,
    #[tabled(rename = "Warnings")]
    pub warnings: usize,
}

impl From<&SimulationReport> for RegimeSummary {
    fn from(report: &SimulationReport) -> Self {
        Self {
            regime: report.regime.label().to_string(),
            total_tax: report.total_tax(),
            total_cashflow: report.total_cashflow(),
            average_monthly_cashflow: report.average_monthly_cashflow(),
            warnings: report.warnings.len(),
        }
    }
}

/// Simulates every requested regime on the blocking pool and prints one
/// summary row each, in the order the regimes were given.
pub async fn run<W: Write>(
    args: &CompareArgs,
    settings: TaxSettings,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let input = Arc::new(read_input(&args.input)?);
    let settings = Arc::new(settings);
    let regimes = if args.regimes.is_empty() {
        Regime::ALL.to_vec()
    } else {
        args.regimes.clone()
    };

    let tasks: Vec<_> = regimes
        .into_iter()
        .map(|regime| {
            let input = Arc::clone(&input);
            let settings = Arc::clone(&settings);
            let handle =
                tokio::task::spawn_blocking(move || simulate(&input, regime, &settings));
            (regime, handle)
        })
        .collect();

    let mut rows = Vec::with_capacity(tasks.len());
    for (regime, handle) in tasks {
        let report = handle
            .await
            .with_context(|| format!("Simulation task for {regime} did not complete"))?
            .with_context(|| format!("Simulation failed for {regime}"))?;
        rows.push(RegimeSummary::from(&report));
    }
    info!(regimes = rows.len(), "Comparison complete");

    write_rows(format, &rows, out)
}

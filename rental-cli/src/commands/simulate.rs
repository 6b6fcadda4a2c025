use std::io::Write;

use anyhow::{Context, Result};
use rental_core::{AnnualResult, SimulationReport, TaxSettings, simulate};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::SimulateArgs;
use crate::commands::read_input;
use crate::output::{OutputFormat, write_json, write_rows};

/// One projected year as printed by `simulate`.
#[derive(Debug, Serialize, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Rent")]
    pub gross_rent: Decimal,
    #[tabled(rename = "Charges")]
    pub deductible_charges: Decimal,
    #[tabled(rename = "Interest")]
    pub interest: Decimal,
    #[tabled(rename = "Depreciation")]
    pub depreciation: Decimal,
    #[tabled(rename = "Result")]
    pub pre_carryforward_result: Decimal,
    #[tabled(rename = "Taxable")]
    pub taxable_result: Decimal,
    #[tabled(rename = "Tax")]
    pub tax: Decimal,
    #[tabled(rename = "Offset saving")]
    pub global_income_tax_saving: Decimal,
    #[tabled(rename = "Debt service")]
    pub debt_service: Decimal,
    #[tabled(rename = "Cashflow")]
    pub annual_cashflow: Decimal,
    #[tabled(rename = "Monthly")]
    pub monthly_cashflow: Decimal,
    #[tabled(rename = "Carryforward")]
    pub outstanding_carryforward: Decimal,
    #[tabled(rename = "Net yield %")]
    pub net_yield_pct: Decimal,
}

impl From<&AnnualResult> for YearRow {
    fn from(year: &AnnualResult) -> Self {
        Self {
            year: year.year,
            gross_rent: year.gross_rent,
            deductible_charges: year.deductible_charges,
            interest: year.interest,
            depreciation: year.depreciation,
            pre_carryforward_result: year.pre_carryforward_result,
            taxable_result: year.taxable_result,
            tax: year.tax,
            global_income_tax_saving: year.global_income_tax_saving,
            debt_service: year.debt_service,
            annual_cashflow: year.annual_cashflow,
            monthly_cashflow: year.monthly_cashflow,
            outstanding_carryforward: year.outstanding_carryforward,
            net_yield_pct: year.net_yield_pct,
        }
    }
}

pub fn run<W: Write>(
    args: &SimulateArgs,
    settings: &TaxSettings,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let input = read_input(&args.input)?;
    let report = simulate(&input, args.regime, settings)
        .with_context(|| format!("Simulation failed for {}", args.regime))?;

    match format {
        // The full report, every field of every year included.
        OutputFormat::Json => write_json(&report, out),
        OutputFormat::Csv => write_rows(format, &year_rows(&report), out),
        OutputFormat::Table => {
            writeln!(
                out,
                "{} | loan {} | monthly payment {}",
                report.regime, report.loan_principal, report.monthly_payment
            )?;
            write_rows(format, &year_rows(&report), out)?;
            write_summary(&report, out)
        }
    }
}

fn year_rows(report: &SimulationReport) -> Vec<YearRow> {
    report.years.iter().map(YearRow::from).collect()
}

fn write_summary<W: Write>(
    report: &SimulationReport,
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "Total tax {} | total cashflow {} | average monthly cashflow {}",
        report.total_tax(),
        report.total_cashflow(),
        report.average_monthly_cashflow()
    )?;

    if !report.warnings.is_empty() {
        writeln!(out, "\nWarnings:")?;
        for warning in &report.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    Ok(())
}

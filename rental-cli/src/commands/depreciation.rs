use std::io::Write;

use anyhow::{Context, Result};
use rental_core::calculations::{DepreciationRow, build_depreciation_plan};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::InputArgs;
use crate::commands::read_input;
use crate::output::{OutputFormat, write_rows};

#[derive(Debug, Serialize, Tabled)]
pub struct PlanRow {
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Building")]
    pub building: Decimal,
    #[tabled(rename = "Furnishings")]
    pub furnishings: Decimal,
    #[tabled(rename = "Works")]
    pub works: Decimal,
    #[tabled(rename = "Fees")]
    pub fees: Decimal,
    #[tabled(rename = "Total")]
    pub total: Decimal,
}

impl From<&DepreciationRow> for PlanRow {
    fn from(row: &DepreciationRow) -> Self {
        Self {
            year: row.year,
            building: row.building,
            furnishings: row.furnishings,
            works: row.works,
            fees: row.fees,
            total: row.total,
        }
    }
}

/// Prints the plan regardless of regime. Only regimes allowing
/// depreciation deduct it in `simulate`.
pub fn run<W: Write>(
    args: &InputArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let input = read_input(args)?;
    let plan = build_depreciation_plan(&input.acquisition, &input.depreciation)
        .with_context(|| format!("Invalid depreciation durations in {}", args.input.display()))?;

    let rows: Vec<PlanRow> = plan.rows().iter().map(PlanRow::from).collect();
    write_rows(format, &rows, out)?;

    if format == OutputFormat::Table {
        writeln!(out, "Total over the horizon {}", plan.total())?;
    }
    Ok(())
}

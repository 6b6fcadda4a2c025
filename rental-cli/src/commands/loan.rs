use std::io::Write;

use anyhow::{Context, Result};
use rental_core::calculations::common::round_half_up;
use rental_core::calculations::{
    LoanSchedule, LoanScheduleRow, LoanYearSummary, build_loan_schedule,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::LoanArgs;
use crate::commands::read_input;
use crate::output::{OutputFormat, write_rows};

#[derive(Debug, Serialize, Tabled)]
pub struct MonthRow {
    #[tabled(rename = "Month")]
    pub month: u32,
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Payment")]
    pub payment: Decimal,
    #[tabled(rename = "Interest")]
    pub interest: Decimal,
    #[tabled(rename = "Principal")]
    pub principal: Decimal,
    #[tabled(rename = "Insurance")]
    pub insurance: Decimal,
    #[tabled(rename = "Balance")]
    pub remaining_balance: Decimal,
}

impl From<&LoanScheduleRow> for MonthRow {
    fn from(row: &LoanScheduleRow) -> Self {
        Self {
            month: row.month,
            year: row.year,
            payment: round_half_up(row.payment),
            interest: round_half_up(row.interest),
            principal: round_half_up(row.principal),
            insurance: round_half_up(row.insurance),
            remaining_balance: round_half_up(row.remaining_balance),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Interest")]
    pub interest: Decimal,
    #[tabled(rename = "Principal")]
    pub principal: Decimal,
    #[tabled(rename = "Insurance")]
    pub insurance: Decimal,
    #[tabled(rename = "Debt service")]
    pub debt_service: Decimal,
    #[tabled(rename = "Balance")]
    pub closing_balance: Decimal,
}

impl From<LoanYearSummary> for YearRow {
    fn from(summary: LoanYearSummary) -> Self {
        Self {
            year: summary.year,
            interest: summary.interest,
            principal: summary.principal,
            insurance: summary.insurance,
            debt_service: summary.debt_service,
            closing_balance: summary.closing_balance,
        }
    }
}

pub fn run<W: Write>(
    args: &LoanArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let input = read_input(&args.input)?;
    let principal = input.acquisition.loan_principal();
    let schedule = build_loan_schedule(principal, &input.loan).with_context(|| {
        format!("Inconsistent loan terms in {}", args.input.input.display())
    })?;

    if args.yearly {
        let rows: Vec<YearRow> = schedule.yearly().into_iter().map(YearRow::from).collect();
        write_rows(format, &rows, out)?;
    } else {
        let rows: Vec<MonthRow> = schedule.rows().iter().map(MonthRow::from).collect();
        write_rows(format, &rows, out)?;
    }

    if format == OutputFormat::Table {
        write_totals(&schedule, out)?;
    }
    Ok(())
}

fn write_totals<W: Write>(
    schedule: &LoanSchedule,
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "Principal {} | monthly payment {} | interest {} | insurance {} | total cost {}",
        round_half_up(schedule.principal()),
        round_half_up(schedule.monthly_payment()),
        schedule.total_interest(),
        schedule.total_insurance(),
        schedule.total_cost()
    )?;
    Ok(())
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Regime;
use crate::calculations::common::round_half_up;

/// One projected year. Money fields are rounded half-up to cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualResult {
    pub year: u32,
    pub gross_rent: Decimal,

    /// Every charge paid by the owner, deductible or not.
    pub cash_charges: Decimal,
    pub deductible_charges: Decimal,

    /// Co-ownership fees re-invoiced to the tenant.
    pub recoverable_charges: Decimal,
    pub interest: Decimal,

    /// Borrower insurance paid, reported whether or not the regime deducts it.
    pub loan_insurance: Decimal,
    pub depreciation: Decimal,
    pub pre_carryforward_result: Decimal,
    pub carryforward_consumed: Decimal,
    pub taxable_result: Decimal,

    /// Tax due on the property result; zero in loss years.
    pub tax: Decimal,

    /// Income tax saved on the household's other income when a deficit is
    /// offset against it. Not part of the cashflow.
    pub global_income_tax_saving: Decimal,

    /// Interest, principal and insurance paid to the lender.
    pub debt_service: Decimal,
    pub annual_cashflow: Decimal,
    pub monthly_cashflow: Decimal,
    pub remaining_loan_balance: Decimal,

    /// Losses still available after this year.
    pub outstanding_carryforward: Decimal,
    pub gross_yield_pct: Decimal,
    pub net_yield_pct: Decimal,
}

impl AnnualResult {
    /// Returns the same row with every money field rounded to cents.
    pub fn rounded(self) -> Self {
        Self {
            year: self.year,
            gross_rent: round_half_up(self.gross_rent),
            cash_charges: round_half_up(self.cash_charges),
            deductible_charges: round_half_up(self.deductible_charges),
            recoverable_charges: round_half_up(self.recoverable_charges),
            interest: round_half_up(self.interest),
            loan_insurance: round_half_up(self.loan_insurance),
            depreciation: round_half_up(self.depreciation),
            pre_carryforward_result: round_half_up(self.pre_carryforward_result),
            carryforward_consumed: round_half_up(self.carryforward_consumed),
            taxable_result: round_half_up(self.taxable_result),
            tax: round_half_up(self.tax),
            global_income_tax_saving: round_half_up(self.global_income_tax_saving),
            debt_service: round_half_up(self.debt_service),
            annual_cashflow: round_half_up(self.annual_cashflow),
            monthly_cashflow: round_half_up(self.monthly_cashflow),
            remaining_loan_balance: round_half_up(self.remaining_loan_balance),
            outstanding_carryforward: round_half_up(self.outstanding_carryforward),
            gross_yield_pct: round_half_up(self.gross_yield_pct),
            net_yield_pct: round_half_up(self.net_yield_pct),
        }
    }
}

/// Non-fatal condition met during a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationWarning {
    /// Gross rent above the ceiling of a micro regime; the regime would no
    /// longer be available to the owner.
    MicroCeilingExceeded {
        year: u32,
        gross_rent: Decimal,
        ceiling: Decimal,
    },
}

impl std::fmt::Display for SimulationWarning {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::MicroCeilingExceeded {
                year,
                gross_rent,
                ceiling,
            } => write!(
                f,
                "year {year}: gross rent {gross_rent} exceeds the micro regime ceiling {ceiling}"
            ),
        }
    }
}

/// Full outcome of a simulation under one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub regime: Regime,
    pub loan_principal: Decimal,

    /// Level monthly instalment after the deferral, insurance excluded.
    pub monthly_payment: Decimal,
    pub years: Vec<AnnualResult>,
    pub warnings: Vec<SimulationWarning>,
}

impl SimulationReport {
    pub fn total_tax(&self) -> Decimal {
        self.years.iter().map(|year| year.tax).sum()
    }

    pub fn total_cashflow(&self) -> Decimal {
        self.years.iter().map(|year| year.annual_cashflow).sum()
    }

    pub fn average_monthly_cashflow(&self) -> Decimal {
        if self.years.is_empty() {
            return Decimal::ZERO;
        }
        let months = Decimal::from(self.years.len() * 12);
        round_half_up(self.total_cashflow() / months)
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Longest loan term a rental lender grants.
pub const MAX_LOAN_DURATION_YEARS: u32 = 40;

/// Base on which the monthly borrower-insurance premium is charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceBasis {
    /// Constant premium computed on the borrowed amount.
    #[default]
    InitialPrincipal,
    /// Premium recomputed on the balance at the start of each month.
    OutstandingBalance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoanTerms {
    #[serde(alias = "duree_annees", alias = "duree_credit")]
    pub duration_years: u32,

    #[serde(alias = "taux_interet", alias = "taux_credit")]
    pub annual_rate_pct: Decimal,

    #[serde(alias = "taux_assurance")]
    pub insurance_rate_pct: Decimal,

    /// Months during which interest is capitalised and nothing is repaid.
    #[serde(alias = "differe_mois")]
    pub deferral_months: u32,

    pub insurance_basis: InsuranceBasis,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            duration_years: 20,
            annual_rate_pct: Decimal::ZERO,
            insurance_rate_pct: Decimal::ZERO,
            deferral_months: 0,
            insurance_basis: InsuranceBasis::default(),
        }
    }
}

impl LoanTerms {
    /// Saturates instead of overflowing; terms longer than
    /// [`MAX_LOAN_DURATION_YEARS`] are rejected before any schedule is built.
    pub fn total_months(&self) -> u32 {
        self.duration_years.saturating_mul(12)
    }

    /// Months left to repay once the deferral is over. Negative or zero when
    /// the deferral swallows the whole term.
    pub fn amortization_months(&self) -> i64 {
        i64::from(self.duration_years) * 12 - i64::from(self.deferral_months)
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    AcquisitionCost, AnnualCharges, ChargeKind, DepreciationDurations, HouseholdTaxProfile,
    LoanTerms, MAX_LOAN_DURATION_YEARS, MarginalRate, RentalRevenue,
};

/// Longest deferral a lender grants on a rental loan.
pub const MAX_DEFERRAL_MONTHS: u32 = 24;

/// A field of [`SimulationInput`] outside its accepted range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputValidationError {
    #[error("{field} must be between 0 and 100 percent, got {value}")]
    PercentOutOfRange { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("vacancy must be between 0 and 12 months, got {0}")]
    VacancyOutOfRange(Decimal),

    #[error("deferral must be between 0 and 24 months, got {0}")]
    DeferralOutOfRange(u32),

    #[error("loan duration must be between 1 and 40 years, got {0}")]
    DurationOutOfRange(u32),
}

/// Everything needed to project one property over the simulation horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationInput {
    pub acquisition: AcquisitionCost,
    pub loan: LoanTerms,
    pub charges: AnnualCharges,
    pub revenue: RentalRevenue,
    pub depreciation: DepreciationDurations,
    pub household: HouseholdTaxProfile,
}

impl SimulationInput {
    /// Range-checks every user-entered field.
    ///
    /// Loan-term consistency (deferral shorter than the term), zero
    /// depreciation durations and non-positive tax parts are configuration
    /// errors reported by the schedules and the marginal-rate resolver.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputValidationError`] found.
    pub fn validate(&self) -> Result<(), InputValidationError> {
        let acquisition = &self.acquisition;
        let revenue = &self.revenue;

        let percents = [
            ("land_share_pct", acquisition.land_share_pct),
            ("notary_fees_pct", acquisition.notary_fees_pct),
            ("annual_rate_pct", self.loan.annual_rate_pct),
            ("insurance_rate_pct", self.loan.insurance_rate_pct),
            ("rent_indexation_pct", revenue.rent_indexation_pct),
            ("charges_indexation_pct", revenue.charges_indexation_pct),
        ];
        for (field, value) in percents {
            check_percent(field, value)?;
        }

        let amounts = [
            ("price", acquisition.price),
            ("down_payment", acquisition.down_payment),
            ("file_fees", acquisition.file_fees),
            ("agency_fees", acquisition.agency_fees),
            ("guarantee_fees", acquisition.guarantee_fees),
            ("third_party_fees", acquisition.third_party_fees),
            ("renovation_cost", acquisition.renovation_cost),
            ("furnishings_cost", acquisition.furnishings_cost),
            ("monthly_rent", revenue.monthly_rent),
        ];
        for (field, value) in amounts {
            check_non_negative(field, value)?;
        }
        for kind in ChargeKind::ALL {
            check_non_negative(kind.as_str(), self.charges.amount(kind))?;
        }

        if revenue.vacancy_months < Decimal::ZERO || revenue.vacancy_months > dec!(12) {
            return Err(InputValidationError::VacancyOutOfRange(
                revenue.vacancy_months,
            ));
        }
        if self.loan.deferral_months > MAX_DEFERRAL_MONTHS {
            return Err(InputValidationError::DeferralOutOfRange(
                self.loan.deferral_months,
            ));
        }
        if !(1..=MAX_LOAN_DURATION_YEARS).contains(&self.loan.duration_years) {
            return Err(InputValidationError::DurationOutOfRange(
                self.loan.duration_years,
            ));
        }

        match &self.household.marginal_rate {
            MarginalRate::Flat { rate_pct } => check_percent("rate_pct", *rate_pct)?,
            MarginalRate::Brackets {
                household_income, ..
            } => check_non_negative("household_income", *household_income)?,
        }

        Ok(())
    }
}

fn check_percent(
    field: &'static str,
    value: Decimal,
) -> Result<(), InputValidationError> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(InputValidationError::PercentOutOfRange { field, value });
    }
    Ok(())
}

fn check_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), InputValidationError> {
    if value < Decimal::ZERO {
        return Err(InputValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

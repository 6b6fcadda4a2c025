use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaxBracket;

/// Errors raised when a [`TaxSettings`] value is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A rate field is outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// A threshold or ceiling field is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The income-tax bracket table is empty.
    #[error("income bracket table is empty")]
    NoTaxBrackets,

    /// Brackets overlap, leave a gap or are not sorted by `min_income`.
    #[error("income bracket {index} does not start where the previous one ends")]
    UnorderedBrackets { index: usize },
}

/// Fiscal parameters for one tax year.
///
/// Every field has a default matching the French schedule in force when the
/// projection model was calibrated, so a settings file only needs to list the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxSettings {
    pub tax_year: i32,

    /// CSG/CRDS levy on property income (17.2 %).
    pub social_levy_rate: Decimal,

    /// Reduced corporate rate applied up to `corporate_reduced_threshold`.
    pub corporate_reduced_rate: Decimal,
    pub corporate_reduced_threshold: Decimal,
    pub corporate_standard_rate: Decimal,

    pub micro_bic_abatement: Decimal,
    pub micro_bic_ceiling: Decimal,
    pub micro_foncier_abatement: Decimal,
    pub micro_foncier_ceiling: Decimal,

    /// Contribution rate replacing the social levy for professional
    /// furnished letting (LMP).
    pub self_employed_contribution_rate: Decimal,

    /// Share of co-ownership fees re-invoiced to the tenant.
    pub recoverable_share: Decimal,

    /// Yearly cap on a property deficit offset against global income.
    pub property_deficit_cap: Decimal,

    pub income_brackets: Vec<TaxBracket>,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            tax_year: 2024,
            social_levy_rate: dec!(0.172),
            corporate_reduced_rate: dec!(0.15),
            corporate_reduced_threshold: dec!(42500),
            corporate_standard_rate: dec!(0.25),
            micro_bic_abatement: dec!(0.50),
            micro_bic_ceiling: dec!(77700),
            micro_foncier_abatement: dec!(0.30),
            micro_foncier_ceiling: dec!(15000),
            self_employed_contribution_rate: dec!(0.40),
            recoverable_share: dec!(0.80),
            property_deficit_cap: dec!(10700),
            income_brackets: default_income_brackets(),
        }
    }
}

fn default_income_brackets() -> Vec<TaxBracket> {
    let bracket = |min: Decimal, max: Option<Decimal>, rate: Decimal| TaxBracket {
        min_income: min,
        max_income: max,
        rate,
    };

    vec![
        bracket(dec!(0), Some(dec!(11294)), dec!(0)),
        bracket(dec!(11294), Some(dec!(28797)), dec!(0.11)),
        bracket(dec!(28797), Some(dec!(82341)), dec!(0.30)),
        bracket(dec!(82341), Some(dec!(177106)), dec!(0.41)),
        bracket(dec!(177106), None, dec!(0.45)),
    ]
}

impl TaxSettings {
    /// Checks rates, thresholds and the bracket table.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] found.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use rental_core::{SettingsError, TaxSettings};
    ///
    /// let settings = TaxSettings {
    ///     social_levy_rate: dec!(17.2),
    ///     ..TaxSettings::default()
    /// };
    ///
    /// assert_eq!(
    ///     settings.validate(),
    ///     Err(SettingsError::RateOutOfRange {
    ///         field: "social_levy_rate",
    ///         value: dec!(17.2),
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), SettingsError> {
        let rates = [
            ("social_levy_rate", self.social_levy_rate),
            ("corporate_reduced_rate", self.corporate_reduced_rate),
            ("corporate_standard_rate", self.corporate_standard_rate),
            ("micro_bic_abatement", self.micro_bic_abatement),
            ("micro_foncier_abatement", self.micro_foncier_abatement),
            (
                "self_employed_contribution_rate",
                self.self_employed_contribution_rate,
            ),
            ("recoverable_share", self.recoverable_share),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(SettingsError::RateOutOfRange { field, value });
            }
        }

        let amounts = [
            ("corporate_reduced_threshold", self.corporate_reduced_threshold),
            ("micro_bic_ceiling", self.micro_bic_ceiling),
            ("micro_foncier_ceiling", self.micro_foncier_ceiling),
            ("property_deficit_cap", self.property_deficit_cap),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(SettingsError::NegativeAmount { field, value });
            }
        }

        validate_brackets(&self.income_brackets)
    }
}

/// Checks that brackets are contiguous, ascending and rated within `[0, 1]`.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), SettingsError> {
    let Some(first) = brackets.first() else {
        return Err(SettingsError::NoTaxBrackets);
    };
    if first.min_income < Decimal::ZERO {
        return Err(SettingsError::NegativeAmount {
            field: "min_income",
            value: first.min_income,
        });
    }

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(SettingsError::RateOutOfRange {
                field: "rate",
                value: bracket.rate,
            });
        }
        if let Some(max) = bracket.max_income
            && max <= bracket.min_income
        {
            return Err(SettingsError::UnorderedBrackets { index });
        }
        if index > 0 && brackets[index - 1].max_income != Some(bracket.min_income) {
            return Err(SettingsError::UnorderedBrackets { index });
        }
    }

    Ok(())
}

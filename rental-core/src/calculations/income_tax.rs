//! Marginal income-tax rate and corporate-tax helpers.
//!
//! The personal regimes tax the rental result at the owner's marginal rate
//! (TMI) plus social levies. The marginal rate is either a flat assumption
//! or the rate of the bracket in which the household's family quotient
//! falls once the rental result is added:
//!
//! ```text
//! quotient = (household_income + max(taxable_rental_result, 0)) / tax_parts
//! ```
//!
//! Entity regimes pay corporate tax: a reduced rate up to a threshold and
//! the standard rate on the excess.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rental_core::{MarginalRate, TaxSettings};
//! use rental_core::calculations::MarginalRateResolver;
//!
//! let settings = TaxSettings::default();
//! let mode = MarginalRate::Brackets {
//!     household_income: dec!(60000),
//!     tax_parts: dec!(2),
//! };
//!
//! let resolver = MarginalRateResolver::new(&settings.income_brackets, &mode).unwrap();
//!
//! // (60,000 + 5,000) / 2 = 32,500 falls in the 30 % bracket
//! assert_eq!(resolver.rate_for(dec!(5000)), dec!(0.30));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{max, round_half_up};
use crate::{MarginalRate, TaxBracket, TaxSettings};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeTaxError {
    /// No tax brackets were provided for the calculation.
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    /// The bracket table does not cover the given family quotient.
    #[error("no tax bracket found for family quotient {0}")]
    NoMatchingBracket(Decimal),

    #[error("tax parts must be positive, got {0}")]
    InvalidTaxParts(Decimal),
}

/// Resolves the marginal rate applied to a rental result.
#[derive(Debug, Clone)]
pub enum MarginalRateResolver<'a> {
    Flat(Decimal),
    Brackets {
        brackets: &'a [TaxBracket],
        household_income: Decimal,
        tax_parts: Decimal,
    },
}

impl<'a> MarginalRateResolver<'a> {
    /// Prepares the resolver for `mode`.
    ///
    /// # Errors
    ///
    /// In bracket mode, returns [`IncomeTaxError`] when the table is empty,
    /// when the number of parts is not positive, or when the table does not
    /// start low enough to cover the household income alone.
    pub fn new(
        brackets: &'a [TaxBracket],
        mode: &MarginalRate,
    ) -> Result<Self, IncomeTaxError> {
        match mode {
            MarginalRate::Flat { rate_pct } => Ok(Self::Flat(*rate_pct / Decimal::ONE_HUNDRED)),
            MarginalRate::Brackets {
                household_income,
                tax_parts,
            } => {
                if brackets.is_empty() {
                    return Err(IncomeTaxError::NoTaxBrackets);
                }
                if *tax_parts <= Decimal::ZERO {
                    return Err(IncomeTaxError::InvalidTaxParts(*tax_parts));
                }

                let resolver = Self::Brackets {
                    brackets,
                    household_income: *household_income,
                    tax_parts: *tax_parts,
                };
                let base_quotient = *household_income / *tax_parts;
                find_bracket(brackets, base_quotient)?;

                Ok(resolver)
            }
        }
    }

    /// Marginal rate, as a fraction, for a year whose taxable rental result
    /// is `taxable`. Negative results do not lower the quotient.
    pub fn rate_for(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        match self {
            Self::Flat(rate) => *rate,
            Self::Brackets {
                brackets,
                household_income,
                tax_parts,
            } => {
                let quotient = (*household_income + max(taxable, Decimal::ZERO)) / *tax_parts;
                // Tables ending with an open bracket always match; a bounded
                // table falls back to its top rate.
                find_bracket(brackets, quotient)
                    .map(|bracket| bracket.rate)
                    .unwrap_or_else(|_| brackets.last().map_or(Decimal::ZERO, |b| b.rate))
            }
        }
    }
}

fn find_bracket(
    brackets: &[TaxBracket],
    quotient: Decimal,
) -> Result<&TaxBracket, IncomeTaxError> {
    brackets
        .iter()
        .find(|bracket| bracket.contains(quotient))
        .ok_or(IncomeTaxError::NoMatchingBracket(quotient))
}

/// Two-tier corporate tax on `taxable`, zero for a loss.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use rental_core::TaxSettings;
/// use rental_core::calculations::corporate_tax;
///
/// // 42,500 × 15 % + 7,500 × 25 %
/// assert_eq!(corporate_tax(dec!(50000), &TaxSettings::default()), dec!(8250));
/// ```
pub fn corporate_tax(
    taxable: Decimal,
    settings: &TaxSettings,
) -> Decimal {
    if taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let reduced_base = taxable.min(settings.corporate_reduced_threshold);
    let standard_base = max(taxable - settings.corporate_reduced_threshold, Decimal::ZERO);

    round_half_up(
        reduced_base * settings.corporate_reduced_rate
            + standard_base * settings.corporate_standard_rate,
    )
}

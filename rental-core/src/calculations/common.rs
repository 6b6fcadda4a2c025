//! Shared arithmetic helpers for the projection calculations.
//!
//! Everything is computed in full [`Decimal`] precision; rounding to cents
//! happens once, when a value is reported.

use rust_decimal::{Decimal, MathematicalOps};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rental_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rental_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Compound growth multiplier `(1 + pct/100)^(year - 1)` for a yearly
/// indexation rate given in percent. Year 1 is always `1`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rental_core::calculations::common::growth_factor;
///
/// assert_eq!(growth_factor(dec!(2), 1), dec!(1));
/// assert_eq!(growth_factor(dec!(2), 3), dec!(1.0404));
/// ```
pub fn growth_factor(
    pct: Decimal,
    year: u32,
) -> Decimal {
    if year <= 1 || pct.is_zero() {
        return Decimal::ONE;
    }
    (Decimal::ONE + pct / Decimal::ONE_HUNDRED).powu(u64::from(year - 1))
}

/// Monthly rate from a yearly percentage: `pct / 1200`.
pub fn monthly_rate(annual_pct: Decimal) -> Decimal {
    annual_pct / Decimal::from(1200)
}

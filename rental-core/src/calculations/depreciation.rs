//! Straight-line depreciation plan over the projection horizon.
//!
//! Four components are depreciated independently, each over its own
//! duration: the building (price minus land), the furnishings, the
//! renovation works and the capitalised acquisition fees.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::calculations::engine::HORIZON_YEARS;
use crate::{AcquisitionCost, DepreciationDurations};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DepreciationError {
    #[error("depreciation duration of {component} must be at least one year")]
    ZeroDuration { component: DepreciationComponent },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationComponent {
    Building,
    Furnishings,
    Works,
    Fees,
}

impl DepreciationComponent {
    pub const ALL: [DepreciationComponent; 4] =
        [Self::Building, Self::Furnishings, Self::Works, Self::Fees];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Furnishings => "furnishings",
            Self::Works => "works",
            Self::Fees => "fees",
        }
    }
}

impl std::fmt::Display for DepreciationComponent {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationRow {
    pub year: u32,
    pub building: Decimal,
    pub furnishings: Decimal,
    pub works: Decimal,
    pub fees: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationPlan {
    rows: Vec<DepreciationRow>,
}

impl DepreciationPlan {
    /// Computes the yearly allowance of every component.
    ///
    /// # Errors
    ///
    /// Returns [`DepreciationError::ZeroDuration`] before any year is
    /// computed when a component has a zero duration.
    pub fn build(
        acquisition: &AcquisitionCost,
        durations: &DepreciationDurations,
    ) -> Result<Self, DepreciationError> {
        let components = [
            (
                DepreciationComponent::Building,
                acquisition.building_base(),
                durations.building,
            ),
            (
                DepreciationComponent::Furnishings,
                acquisition.furnishings_cost,
                durations.furnishings,
            ),
            (
                DepreciationComponent::Works,
                acquisition.renovation_cost,
                durations.works,
            ),
            (
                DepreciationComponent::Fees,
                acquisition.capitalised_fees(),
                durations.fees,
            ),
        ];

        let mut annual = [Decimal::ZERO; 4];
        for (slot, (component, base, duration)) in annual.iter_mut().zip(components) {
            if duration == 0 {
                return Err(DepreciationError::ZeroDuration { component });
            }
            *slot = round_half_up(base / Decimal::from(duration));
        }

        let allowance = |index: usize, year: u32| {
            if year <= components[index].2 {
                annual[index]
            } else {
                Decimal::ZERO
            }
        };

        let rows = (1..=HORIZON_YEARS)
            .map(|year| {
                let building = allowance(0, year);
                let furnishings = allowance(1, year);
                let works = allowance(2, year);
                let fees = allowance(3, year);
                DepreciationRow {
                    year,
                    building,
                    furnishings,
                    works,
                    fees,
                    total: building + furnishings + works + fees,
                }
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[DepreciationRow] {
        &self.rows
    }

    /// Total allowance of `year`, zero outside the horizon.
    pub fn total_for_year(
        &self,
        year: u32,
    ) -> Decimal {
        self.rows
            .iter()
            .find(|row| row.year == year)
            .map_or(Decimal::ZERO, |row| row.total)
    }

    pub fn total(&self) -> Decimal {
        self.rows.iter().map(|row| row.total).sum()
    }
}

/// Builds the depreciation plan of `acquisition`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use rental_core::{AcquisitionCost, DepreciationDurations};
/// use rental_core::calculations::build_depreciation_plan;
///
/// let acquisition = AcquisitionCost {
///     price: dec!(150000),
///     land_share_pct: dec!(0),
///     ..AcquisitionCost::default()
/// };
///
/// let plan = build_depreciation_plan(&acquisition, &DepreciationDurations::default()).unwrap();
///
/// assert_eq!(plan.total_for_year(1), dec!(5000));
/// ```
pub fn build_depreciation_plan(
    acquisition: &AcquisitionCost,
    durations: &DepreciationDurations,
) -> Result<DepreciationPlan, DepreciationError> {
    DepreciationPlan::build(acquisition, durations)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn test_acquisition() -> AcquisitionCost {
        AcquisitionCost {
            price: dec!(200000),
            land_share_pct: dec!(10),
            file_fees: dec!(1000),
            agency_fees: dec!(7000),
            guarantee_fees: dec!(1500),
            third_party_fees: dec!(500),
            renovation_cost: dec!(15000),
            furnishings_cost: dec!(7000),
            ..AcquisitionCost::default()
        }
    }

    #[test]
    fn building_only_plan_is_flat_over_horizon() {
        let acquisition = AcquisitionCost {
            price: dec!(150000),
            land_share_pct: Decimal::ZERO,
            ..AcquisitionCost::default()
        };

        let plan = build_depreciation_plan(&acquisition, &DepreciationDurations::default()).unwrap();

        assert_eq!(plan.rows().len(), 10);
        assert!(plan.rows().iter().all(|row| row.total == dec!(5000)));
    }

    #[test]
    fn components_stop_after_their_duration() {
        let plan =
            build_depreciation_plan(&test_acquisition(), &DepreciationDurations::default())
                .unwrap();

        let year_5 = &plan.rows()[4];
        assert_eq!(year_5.building, dec!(6000));
        assert_eq!(year_5.furnishings, dec!(1000));
        assert_eq!(year_5.works, dec!(1500));
        assert_eq!(year_5.fees, dec!(2000));
        assert_eq!(year_5.total, dec!(10500));

        let year_6 = &plan.rows()[5];
        assert_eq!(year_6.fees, Decimal::ZERO);
        assert_eq!(year_6.total, dec!(8500));

        let year_8 = &plan.rows()[7];
        assert_eq!(year_8.furnishings, Decimal::ZERO);
        assert_eq!(year_8.total, dec!(7500));
    }

    #[test]
    fn amounts_are_rounded_to_cents() {
        let acquisition = AcquisitionCost {
            price: Decimal::ZERO,
            furnishings_cost: dec!(10000),
            ..AcquisitionCost::default()
        };

        let plan = build_depreciation_plan(&acquisition, &DepreciationDurations::default()).unwrap();

        assert_eq!(plan.total_for_year(1), dec!(1428.57));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let durations = DepreciationDurations {
            works: 0,
            ..DepreciationDurations::default()
        };

        let result = build_depreciation_plan(&test_acquisition(), &durations);

        assert_eq!(
            result,
            Err(DepreciationError::ZeroDuration {
                component: DepreciationComponent::Works,
            })
        );
    }

    #[test]
    fn total_for_year_outside_horizon_is_zero() {
        let plan =
            build_depreciation_plan(&test_acquisition(), &DepreciationDurations::default())
                .unwrap();

        assert_eq!(plan.total_for_year(0), Decimal::ZERO);
        assert_eq!(plan.total_for_year(11), Decimal::ZERO);
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How the owner's marginal income-tax rate (TMI) is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MarginalRate {
    /// Fixed rate, in percent.
    Flat { rate_pct: Decimal },

    /// Looked up in the bracket table from the family quotient.
    Brackets {
        household_income: Decimal,
        tax_parts: Decimal,
    },
}

impl Default for MarginalRate {
    fn default() -> Self {
        Self::Flat { rate_pct: dec!(30) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdTaxProfile {
    pub marginal_rate: MarginalRate,

    /// Offset property deficits against global income (location nue and
    /// SCI à l'IR only), up to the yearly cap.
    pub offset_property_deficit: bool,
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::max;

/// Purchase price and one-off acquisition costs of the property.
///
/// Field names accept the French keys of the historical input records
/// (`prix_bien`, `apport`, ...) as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcquisitionCost {
    #[serde(alias = "prix_bien")]
    pub price: Decimal,

    /// Share of the price attributed to land, in percent. Land is never
    /// depreciated.
    #[serde(alias = "part_terrain")]
    pub land_share_pct: Decimal,

    #[serde(alias = "apport", alias = "montant_apport")]
    pub down_payment: Decimal,

    #[serde(alias = "frais_dossier")]
    pub file_fees: Decimal,

    #[serde(alias = "frais_agence")]
    pub agency_fees: Decimal,

    #[serde(alias = "frais_garantie", alias = "caution")]
    pub guarantee_fees: Decimal,

    #[serde(alias = "frais_tiers")]
    pub third_party_fees: Decimal,

    #[serde(alias = "frais_notaire_pct")]
    pub notary_fees_pct: Decimal,

    #[serde(alias = "montant_travaux", alias = "travaux")]
    pub renovation_cost: Decimal,

    /// Furniture bought in cash; depreciated but never financed.
    #[serde(alias = "mobilier")]
    pub furnishings_cost: Decimal,
}

impl Default for AcquisitionCost {
    fn default() -> Self {
        Self {
            price: Decimal::ZERO,
            land_share_pct: dec!(15),
            down_payment: Decimal::ZERO,
            file_fees: Decimal::ZERO,
            agency_fees: Decimal::ZERO,
            guarantee_fees: Decimal::ZERO,
            third_party_fees: Decimal::ZERO,
            notary_fees_pct: dec!(8),
            renovation_cost: Decimal::ZERO,
            furnishings_cost: Decimal::ZERO,
        }
    }
}

impl AcquisitionCost {
    pub fn notary_fees(&self) -> Decimal {
        self.price * self.notary_fees_pct / dec!(100)
    }

    /// Amount borrowed: every financed cost minus the down payment, floored
    /// at zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use rental_core::AcquisitionCost;
    ///
    /// let acquisition = AcquisitionCost {
    ///     price: dec!(200000),
    ///     down_payment: dec!(20000),
    ///     agency_fees: dec!(5000),
    ///     furnishings_cost: dec!(8000),
    ///     ..AcquisitionCost::default()
    /// };
    ///
    /// // 200,000 + 16,000 notary + 5,000 agency - 20,000 down payment
    /// assert_eq!(acquisition.loan_principal(), dec!(201000));
    /// ```
    pub fn loan_principal(&self) -> Decimal {
        let financed = self.price
            + self.notary_fees()
            + self.agency_fees
            + self.file_fees
            + self.renovation_cost
            + self.guarantee_fees
            + self.third_party_fees;

        max(financed - self.down_payment, Decimal::ZERO)
    }

    /// Cash committed to the operation, used as the yield denominator.
    pub fn initial_investment(&self) -> Decimal {
        self.down_payment + self.loan_principal()
    }

    /// Price share subject to building depreciation.
    pub fn building_base(&self) -> Decimal {
        self.price * (Decimal::ONE - self.land_share_pct / dec!(100))
    }

    /// Acquisition fees capitalised and depreciated with the fees component.
    pub fn capitalised_fees(&self) -> Decimal {
        self.file_fees + self.agency_fees + self.guarantee_fees + self.third_party_fees
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn test_acquisition() -> AcquisitionCost {
        AcquisitionCost {
            price: dec!(150000),
            land_share_pct: dec!(20),
            down_payment: dec!(15000),
            file_fees: dec!(1000),
            agency_fees: dec!(6000),
            guarantee_fees: dec!(1500),
            third_party_fees: dec!(500),
            notary_fees_pct: dec!(8),
            renovation_cost: dec!(10000),
            furnishings_cost: dec!(5000),
        }
    }

    #[test]
    fn notary_fees_are_a_share_of_price() {
        assert_eq!(test_acquisition().notary_fees(), dec!(12000));
    }

    #[test]
    fn loan_principal_excludes_furnishings() {
        // 150,000 + 12,000 + 6,000 + 1,000 + 10,000 + 1,500 + 500 - 15,000
        assert_eq!(test_acquisition().loan_principal(), dec!(166000));
    }

    #[test]
    fn loan_principal_is_zero_when_paid_in_cash() {
        let acquisition = AcquisitionCost {
            down_payment: dec!(500000),
            ..test_acquisition()
        };

        assert_eq!(acquisition.loan_principal(), Decimal::ZERO);
    }

    #[test]
    fn initial_investment_adds_down_payment() {
        assert_eq!(test_acquisition().initial_investment(), dec!(181000));
    }

    #[test]
    fn building_base_excludes_land() {
        assert_eq!(test_acquisition().building_base(), dec!(120000));
    }

    #[test]
    fn capitalised_fees_exclude_notary() {
        assert_eq!(test_acquisition().capitalised_fees(), dec!(9000));
    }

    #[test]
    fn deserializes_french_keys() {
        let acquisition: AcquisitionCost =
            serde_json::from_str(r#"{ "prix_bien": 100000, "apport": 10000, "mobilier": 3000 }"#)
                .unwrap();

        assert_eq!(acquisition.price, dec!(100000));
        assert_eq!(acquisition.down_payment, dec!(10000));
        assert_eq!(acquisition.furnishings_cost, dec!(3000));
        assert_eq!(acquisition.notary_fees_pct, dec!(8));
    }
}

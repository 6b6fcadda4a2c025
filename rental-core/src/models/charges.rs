use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recurring annual expense categories borne by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    CoOwnership,
    LandlordInsurance,
    RentDefaultInsurance,
    PropertyTax,
    Maintenance,
    Accounting,
    BankFees,
    Management,
    HousingTax,
}

impl ChargeKind {
    pub const ALL: [ChargeKind; 9] = [
        Self::CoOwnership,
        Self::LandlordInsurance,
        Self::RentDefaultInsurance,
        Self::PropertyTax,
        Self::Maintenance,
        Self::Accounting,
        Self::BankFees,
        Self::Management,
        Self::HousingTax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoOwnership => "co_ownership",
            Self::LandlordInsurance => "landlord_insurance",
            Self::RentDefaultInsurance => "rent_default_insurance",
            Self::PropertyTax => "property_tax",
            Self::Maintenance => "maintenance",
            Self::Accounting => "accounting",
            Self::BankFees => "bank_fees",
            Self::Management => "management",
            Self::HousingTax => "housing_tax",
        }
    }
}

/// Yearly amounts for each [`ChargeKind`], in year-1 euros.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnualCharges {
    #[serde(alias = "charges_copro")]
    pub co_ownership: Decimal,

    /// Propriétaire non occupant insurance.
    #[serde(alias = "assurance_pno", alias = "assurance_habitation")]
    pub landlord_insurance: Decimal,

    /// Garantie loyers impayés.
    #[serde(alias = "assurance_gli")]
    pub rent_default_insurance: Decimal,

    #[serde(alias = "taxe_fonciere")]
    pub property_tax: Decimal,

    #[serde(alias = "frais_entretien")]
    pub maintenance: Decimal,

    #[serde(alias = "frais_compta", alias = "comptabilite")]
    pub accounting: Decimal,

    #[serde(alias = "frais_bancaires", alias = "frais_bancaire")]
    pub bank_fees: Decimal,

    #[serde(alias = "frais_gestion", alias = "gestion_locative")]
    pub management: Decimal,

    #[serde(alias = "taxe_habitation")]
    pub housing_tax: Decimal,
}

impl AnnualCharges {
    pub fn amount(
        &self,
        kind: ChargeKind,
    ) -> Decimal {
        match kind {
            ChargeKind::CoOwnership => self.co_ownership,
            ChargeKind::LandlordInsurance => self.landlord_insurance,
            ChargeKind::RentDefaultInsurance => self.rent_default_insurance,
            ChargeKind::PropertyTax => self.property_tax,
            ChargeKind::Maintenance => self.maintenance,
            ChargeKind::Accounting => self.accounting,
            ChargeKind::BankFees => self.bank_fees,
            ChargeKind::Management => self.management,
            ChargeKind::HousingTax => self.housing_tax,
        }
    }

    /// Sum of the listed kinds.
    pub fn sum_of(
        &self,
        kinds: &[ChargeKind],
    ) -> Decimal {
        kinds.iter().map(|kind| self.amount(*kind)).sum()
    }

    /// Everything the owner pays in a year.
    pub fn total(&self) -> Decimal {
        self.sum_of(&ChargeKind::ALL)
    }
}

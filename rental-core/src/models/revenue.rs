use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Rent collected on the property and the yearly growth of rent and charges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RentalRevenue {
    #[serde(alias = "loyer_mensuel_hc", alias = "loyer_mensuel")]
    pub monthly_rent: Decimal,

    /// Months per year without a tenant (0-12).
    #[serde(alias = "vacance_locative_mois")]
    pub vacancy_months: Decimal,

    /// Yearly rent increase, in percent.
    pub rent_indexation_pct: Decimal,

    /// Yearly increase of every charge, in percent.
    pub charges_indexation_pct: Decimal,
}

impl RentalRevenue {
    /// Rent actually collected in year 1.
    pub fn base_gross_rent(&self) -> Decimal {
        self.monthly_rent * (dec!(12) - self.vacancy_months)
    }

    /// Rent of a fully let year, without indexation.
    pub fn full_year_rent(&self) -> Decimal {
        self.monthly_rent * dec!(12)
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of the personal income-tax schedule, applied to the family
/// quotient (taxable household income divided by the number of tax parts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Whether `quotient` falls inside this bracket (upper bound inclusive).
    pub fn contains(
        &self,
        quotient: Decimal,
    ) -> bool {
        quotient >= self.min_income && self.max_income.is_none_or(|max| quotient <= max)
    }
}

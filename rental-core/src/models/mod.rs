mod acquisition;
mod annual_result;
mod charges;
mod depreciation_durations;
mod household;
mod loan_terms;
mod regime;
mod revenue;
mod simulation_input;
mod tax_bracket;
mod tax_settings;

pub use acquisition::AcquisitionCost;
pub use annual_result::{AnnualResult, SimulationReport, SimulationWarning};
pub use charges::{AnnualCharges, ChargeKind};
pub use depreciation_durations::DepreciationDurations;
pub use household::{HouseholdTaxProfile, MarginalRate};
pub use loan_terms::{InsuranceBasis, LoanTerms, MAX_LOAN_DURATION_YEARS};
pub use regime::{LossTreatment, Regime, RegimeProfile, TaxFormula};
pub use revenue::RentalRevenue;
pub use simulation_input::{InputValidationError, MAX_DEFERRAL_MONTHS, SimulationInput};
pub use tax_bracket::TaxBracket;
pub use tax_settings::{SettingsError, TaxSettings, validate_brackets};

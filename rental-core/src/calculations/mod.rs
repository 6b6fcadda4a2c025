//! Projection calculations for a rental investment.
//!
//! Each module computes one building block of the yearly projection: the
//! loan schedule, the depreciation plan, the loss carryforward ledger and
//! the income-tax helpers. The [`engine`] module combines them.

pub mod carryforward;
pub mod common;
pub mod depreciation;
pub mod engine;
pub mod income_tax;
pub mod loan;

pub use carryforward::{CarryforwardError, LossCarryforward};
pub use depreciation::{
    DepreciationComponent, DepreciationError, DepreciationPlan, DepreciationRow,
    build_depreciation_plan,
};
pub use engine::{FiscalEngine, HORIZON_YEARS, SimulationError, simulate};
pub use income_tax::{IncomeTaxError, MarginalRateResolver, corporate_tax};
pub use loan::{
    LoanSchedule, LoanScheduleError, LoanScheduleRow, LoanYearSummary, build_loan_schedule,
};

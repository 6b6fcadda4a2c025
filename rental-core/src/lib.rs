pub mod calculations;
pub mod models;

pub use calculations::{FiscalEngine, SimulationError, simulate};
pub use models::*;

pub mod compare;
pub mod depreciation;
pub mod loan;
pub mod simulate;

use anyhow::{Context, Result};
use rental_core::SimulationInput;
use rental_data::load_input;

use crate::cli::InputArgs;

pub(crate) fn read_input(args: &InputArgs) -> Result<SimulationInput> {
    load_input(&args.input).with_context(|| format!("Failed to load: {}", args.input.display()))
}

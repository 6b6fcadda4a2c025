//! Ledger of tax losses awaiting imputation on later profits.
//!
//! The ledger holds one slot per origin year of the projection. A year
//! closing with a loss writes its slot; a profitable year consumes the
//! slots oldest first until the profit or the losses run out.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rental_core::calculations::LossCarryforward;
//!
//! let mut ledger = LossCarryforward::new();
//! ledger.record_loss(1, dec!(500)).unwrap();
//! ledger.record_loss(2, dec!(300)).unwrap();
//!
//! let consumed = ledger.consume(dec!(600));
//!
//! assert_eq!(consumed, dec!(600));
//! assert_eq!(ledger.remaining(1), dec!(0));
//! assert_eq!(ledger.remaining(2), dec!(200));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::engine::HORIZON_YEARS;

const SLOTS: usize = HORIZON_YEARS as usize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarryforwardError {
    #[error("loss origin year {0} is outside 1..=10")]
    YearOutOfRange(u32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossCarryforward {
    slots: [Decimal; SLOTS],
}

impl LossCarryforward {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the loss of `year`, replacing any previous value of that slot.
    /// The sign of `amount` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CarryforwardError::YearOutOfRange`] outside `1..=10`.
    pub fn record_loss(
        &mut self,
        year: u32,
        amount: Decimal,
    ) -> Result<(), CarryforwardError> {
        let slot = Self::slot_index(year)?;
        self.slots[slot] = amount.abs();
        Ok(())
    }

    /// Imputes losses on `available` profit, oldest origin year first.
    ///
    /// Returns the total consumed, never more than `available` nor than the
    /// outstanding losses. A non-positive `available` consumes nothing.
    pub fn consume(
        &mut self,
        available: Decimal,
    ) -> Decimal {
        let mut budget = available;
        let mut consumed = Decimal::ZERO;

        for slot in self.slots.iter_mut() {
            if budget <= Decimal::ZERO {
                break;
            }
            let taken = (*slot).min(budget);
            *slot -= taken;
            budget -= taken;
            consumed += taken;
        }

        consumed
    }

    /// Sum of every slot.
    pub fn outstanding(&self) -> Decimal {
        self.slots.iter().sum()
    }

    /// Loss still available from origin `year` (zero outside the horizon).
    pub fn remaining(
        &self,
        year: u32,
    ) -> Decimal {
        Self::slot_index(year).map_or(Decimal::ZERO, |slot| self.slots[slot])
    }

    /// `(origin year, remaining loss)` pairs in ascending year order.
    pub fn slots(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        (1..).zip(self.slots.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_zero())
    }

    fn slot_index(year: u32) -> Result<usize, CarryforwardError> {
        if year == 0 || year > HORIZON_YEARS {
            return Err(CarryforwardError::YearOutOfRange(year));
        }
        Ok(year as usize - 1)
    }
}

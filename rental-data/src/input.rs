//! Simulation input files.
//!
//! An input file describes one property: acquisition, loan, charges,
//! revenue, depreciation durations and the household's tax profile. Every
//! section and field is optional and falls back to its default; the
//! historical French keys (`prix_bien`, `loyer_mensuel_hc`, ...) are accepted
//! alongside the English ones. Unknown keys are rejected, so a misspelled
//! field cannot silently fall back to zero.
//!
//! ```toml
//! [acquisition]
//! prix_bien = 180000
//! apport = 20000
//!
//! [loan]
//! duration_years = 20
//! annual_rate_pct = 3.6
//!
//! [revenue]
//! loyer_mensuel_hc = 850
//!
//! [household.marginal_rate]
//! mode = "brackets"
//! household_income = 52000
//! tax_parts = 2
//! ```

use std::path::Path;

use rental_core::SimulationInput;
use tracing::debug;

use crate::InputError;

/// Serialization format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Deserializes and range-checks a [`SimulationInput`].
///
/// # Example
///
/// ```
/// use rental_data::{InputFormat, parse_input};
///
/// let input = parse_input("[revenue]\nloyer_mensuel_hc = 700\n", InputFormat::Toml).unwrap();
///
/// assert_eq!(input.revenue.monthly_rent.to_string(), "700");
/// ```
pub fn parse_input(
    content: &str,
    format: InputFormat,
) -> Result<SimulationInput, InputError> {
    let input: SimulationInput = match format {
        InputFormat::Toml => toml::from_str(content)?,
        InputFormat::Json => serde_json::from_str(content)?,
    };
    input.validate()?;
    Ok(input)
}

/// Reads `path`, choosing TOML or JSON from its extension.
pub fn load_input(path: &Path) -> Result<SimulationInput, InputError> {
    let format = InputFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let input = parse_input(&content, format)?;
    debug!(path = %path.display(), ?format, "Loaded simulation input");

    Ok(input)
}

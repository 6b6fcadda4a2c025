//! Tax settings files.
//!
//! Settings are TOML. Any field left out keeps the value of
//! [`TaxSettings::default`], so a file overriding a single rate is valid.
//! The bracket table may be given inline as `[[income_brackets]]` or
//! replaced afterwards from a CSV file with [`with_bracket_file`].

use std::path::Path;

use rental_core::TaxSettings;
use tracing::debug;

use crate::{InputError, TaxBracketLoader};

/// Deserializes and validates settings from TOML text.
///
/// # Example
///
/// ```
/// use rental_data::parse_settings;
///
/// let settings = parse_settings("tax_year = 2025\nsocial_levy_rate = 0.186\n").unwrap();
///
/// assert_eq!(settings.tax_year, 2025);
/// assert_eq!(settings.income_brackets.len(), 5);
/// ```
pub fn parse_settings(content: &str) -> Result<TaxSettings, InputError> {
    let settings: TaxSettings = toml::from_str(content)?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_settings(path: &Path) -> Result<TaxSettings, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let settings = parse_settings(&content)?;
    debug!(
        path = %path.display(),
        tax_year = settings.tax_year,
        "Loaded tax settings"
    );

    Ok(settings)
}

/// Replaces the bracket table of `settings` with the one in the CSV file
/// at `path`.
pub fn with_bracket_file(
    mut settings: TaxSettings,
    path: &Path,
) -> Result<TaxSettings, InputError> {
    settings.income_brackets = TaxBracketLoader::load_file(path)?;
    settings.validate()?;
    Ok(settings)
}

//! CSV loader for the personal income-tax bracket table.
//!
//! ## CSV Format
//!
//! | Column       | Required | Type    | Notes                                    |
//! |--------------|----------|---------|------------------------------------------|
//! | `min_income` | yes      | decimal | lower bound of the family quotient       |
//! | `max_income` | yes      | decimal | upper bound, leave empty for the top one |
//! | `rate`       | yes      | decimal | marginal rate as a fraction, e.g. `0.30` |
//!
//! ```csv
//! min_income,max_income,rate
//! 0,11294,0
//! 11294,28797,0.11
//! 177106,,0.45
//! ```

use std::io::Read;
use std::path::Path;

use rental_core::{SettingsError, TaxBracket, validate_brackets};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bracket table: {0}")]
    InvalidTable(#[from] SettingsError),
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl From<TaxBracketRecord> for TaxBracket {
    fn from(record: TaxBracketRecord) -> Self {
        TaxBracket {
            min_income: record.min_income,
            max_income: record.max_income,
            rate: record.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for income-tax brackets from CSV files.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parses and validates a bracket table from any reader.
    ///
    /// Rows must be sorted by `min_income` and contiguous; only the last one
    /// may leave `max_income` empty.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracket>, TaxBracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut brackets = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            brackets.push(TaxBracket::from(record));
        }

        validate_brackets(&brackets)?;
        debug!(count = brackets.len(), "Parsed income tax brackets");

        Ok(brackets)
    }

    /// Reads `path` and delegates to [`TaxBracketLoader::parse`].
    pub fn load_file(path: &Path) -> Result<Vec<TaxBracket>, TaxBracketLoaderError> {
        let file = std::fs::File::open(path).map_err(|source| TaxBracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(file)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"min_income,max_income,rate
0,11294,0
11294,28797,0.11
28797,82341,0.30
82341,177106,0.41
177106,,0.45
"#;

    #[test]
    fn test_parse_csv_full_schedule() {
        let brackets = TaxBracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(brackets.len(), 5);
        assert_eq!(brackets[1].min_income, dec!(11294));
        assert_eq!(brackets[1].max_income, Some(dec!(28797)));
        assert_eq!(brackets[1].rate, dec!(0.11));
    }

    #[test]
    fn test_parse_csv_unlimited_max_income() {
        let brackets = TaxBracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(brackets[4].max_income, None);
        assert_eq!(brackets[4].rate, dec!(0.45));
    }

    #[test]
    fn test_parse_matches_default_settings() {
        let brackets = TaxBracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(brackets, rental_core::TaxSettings::default().income_brackets);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let csv = "min_income, max_income, rate\n0, 10000, 0\n10000, , 0.2\n";

        let brackets = TaxBracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(brackets[0].max_income, Some(dec!(10000)));
        assert_eq!(brackets[1].max_income, None);
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "min_income,rate\n0,0.10";

        let result = TaxBracketLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let TaxBracketLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "min_income,max_income,rate\nabc,11294,0";

        let result = TaxBracketLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(TaxBracketLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_empty_csv_is_rejected() {
        let csv = "min_income,max_income,rate\n";

        let result = TaxBracketLoader::parse(csv.as_bytes());

        assert!(matches!(
            result,
            Err(TaxBracketLoaderError::InvalidTable(SettingsError::NoTaxBrackets))
        ));
    }

    #[test]
    fn test_parse_rejects_gap_between_rows() {
        let csv = "min_income,max_income,rate\n0,10000,0\n12000,,0.2\n";

        let result = TaxBracketLoader::parse(csv.as_bytes());

        assert!(matches!(
            result,
            Err(TaxBracketLoaderError::InvalidTable(
                SettingsError::UnorderedBrackets { index: 1 }
            ))
        ));
    }

    #[test]
    fn test_load_file_reports_missing_path() {
        let result = TaxBracketLoader::load_file(Path::new("does/not/exist.csv"));

        match result {
            Err(TaxBracketLoaderError::Io { path, .. }) => assert_eq!(path, "does/not/exist.csv"),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}

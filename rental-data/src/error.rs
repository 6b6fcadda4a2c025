use std::path::PathBuf;

use rental_core::{InputValidationError, SettingsError};
use thiserror::Error;

use crate::TaxBracketLoaderError;

/// Errors raised while collecting simulation inputs from disk.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported input format for {}, expected .toml or .json", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Brackets(#[from] TaxBracketLoaderError),

    #[error("invalid simulation input: {0}")]
    Validation(#[from] InputValidationError),

    #[error("invalid tax settings: {0}")]
    Settings(#[from] SettingsError),
}

//! Input collection for the rental simulator: simulation inputs (TOML or
//! JSON), tax settings (TOML) and income-tax brackets (CSV).

mod error;
pub mod input;
pub mod loader;
pub mod settings;

pub use error::InputError;
pub use input::{InputFormat, load_input, parse_input};
pub use loader::{TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};
pub use settings::{load_settings, parse_settings, with_bracket_file};

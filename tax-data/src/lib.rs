//! File loaders for the tax estimator: bracket tables from CSV, deduction
//! and LTCG threshold tables from TOML, and calculation inputs from CSV.

pub mod amount;
pub mod inputs;
pub mod loader;
pub mod tables_file;

pub use amount::{ParseDecimalError, parse_decimal};
pub use inputs::{InputLoadError, load_inputs_from_file, load_inputs_from_str};
pub use loader::{BracketTableLoader, BracketTableLoaderError, BracketTableRecord, LoadedBrackets};
pub use tables_file::{TablesFile, TablesFileError};

//! CSV loader for calculation inputs.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Amount
//! cells accept thousands separators; an empty amount cell is 0, except
//! `standard_deduction`, where empty means "use the table value for the
//! filing status".
//!
//! | Column                    | Required | Notes                                |
//! |---------------------------|----------|--------------------------------------|
//! | `filing_status`           | yes      | One of `S`, `MFJ`, `MFS`, `HOH`      |
//! | `gross_wages`             | yes      |                                      |
//! | `pretax_retirement`       | no       | 401k and similar                     |
//! | `other_pretax_deductions` | no       |                                      |
//! | `short_term_gains`        | no       |                                      |
//! | `long_term_gains`         | no       |                                      |
//! | `withheld`                | no       |                                      |
//! | `standard_deduction`      | no       | Empty uses the filing status default |
//!
//! ```csv
//! filing_status,gross_wages,pretax_retirement,withheld
//! S,"80,000",0,9000
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{FilingStatus, TaxInputs};
use thiserror::Error;

use crate::amount::{deserialize_amount, deserialize_optional_amount};

#[derive(Debug, Deserialize)]
struct CsvRow {
    filing_status: String,
    #[serde(deserialize_with = "deserialize_amount")]
    gross_wages: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pretax_retirement: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    other_pretax_deductions: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    short_term_gains: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    long_term_gains: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    withheld: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    standard_deduction: Option<Decimal>,
}

/// Errors that can occur while loading input rows.
#[derive(Debug, Error)]
pub enum InputLoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, not counting the header.
    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<TaxInputs, InputLoadError> {
    let filing_status = FilingStatus::parse(&row.filing_status).ok_or_else(|| {
        InputLoadError::InvalidFilingStatus {
            status: row.filing_status.clone(),
            row: row_number,
        }
    })?;

    Ok(TaxInputs {
        filing_status,
        gross_wages: row.gross_wages,
        pretax_retirement: row.pretax_retirement,
        other_pretax_deductions: row.other_pretax_deductions,
        short_term_gains: row.short_term_gains,
        long_term_gains: row.long_term_gains,
        withheld: row.withheld,
        standard_deduction: row.standard_deduction,
    })
}

/// Parse CSV text into inputs, in file order.
pub fn load_inputs_from_str(input: &str) -> Result<Vec<TaxInputs>, InputLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Read a file from disk and delegate to [`load_inputs_from_str`].
pub fn load_inputs_from_file(path: &Path) -> Result<Vec<TaxInputs>, InputLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_inputs_from_str(&contents)
}

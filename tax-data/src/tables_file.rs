//! TOML file holding per-status standard deductions and LTCG thresholds.
//!
//! ```toml
//! tax_year = 2025
//!
//! [standard_deduction]
//! single = 15750
//! married_filing_jointly = 31500
//! married_filing_separately = 15750
//! head_of_household = 23625
//!
//! [ltcg_thresholds.single]
//! zero_rate_ceiling = 48350
//! fifteen_rate_ceiling = 533400
//! # ...one table per status
//! ```
//!
//! Amounts may be written as integers or quoted strings (`"15750.50"`);
//! quoting keeps fractional amounts exact.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{LtcgThresholds, PerStatus, TaxTables, TaxTablesError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TablesFileError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tables file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("tables file is for {file}, but brackets are for {brackets}")]
    TaxYearMismatch { file: i32, brackets: i32 },

    #[error(transparent)]
    Tables(#[from] TaxTablesError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TablesFile {
    #[serde(default)]
    pub tax_year: Option<i32>,
    pub standard_deduction: PerStatus<Decimal>,
    pub ltcg_thresholds: PerStatus<LtcgThresholds>,
}

impl TablesFile {
    pub fn parse(contents: &str) -> Result<Self, TablesFileError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, TablesFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TablesFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Replaces the deductions and thresholds of `base`.
    ///
    /// A `tax_year` in the file must match the year of `base`.
    pub fn apply_to(
        &self,
        base: &TaxTables,
    ) -> Result<TaxTables, TablesFileError> {
        if let Some(file_year) = self.tax_year {
            if file_year != base.tax_year() {
                return Err(TablesFileError::TaxYearMismatch {
                    file: file_year,
                    brackets: base.tax_year(),
                });
            }
        }
        let tables = base.with_amounts(self.standard_deduction, self.ltcg_thresholds)?;
        info!(tax_year = tables.tax_year(), "applied deduction and LTCG tables");
        Ok(tables)
    }
}

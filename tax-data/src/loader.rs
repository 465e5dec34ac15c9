use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketTable, FilingStatus, RateBand, RateBandError, TaxTables, TaxTablesError};
use thiserror::Error;
use tracing::{debug, info};

use crate::amount::{deserialize_amount, deserialize_optional_amount, deserialize_required_amount};

/// Errors that can occur when loading bracket table data.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule '{schedule}' on row {row}")]
    InvalidSchedule { schedule: String, row: usize },

    #[error("CSV contains no bracket rows")]
    Empty,

    #[error("CSV mixes tax years {first} and {other}")]
    MixedTaxYears { first: i32, other: i32 },

    #[error("Invalid brackets for {status}: {source}")]
    InvalidTable {
        status: FilingStatus,
        #[source]
        source: RateBandError,
    },

    #[error(
        "Base tax {stated} for {status} bracket starting at {min_income} does not match computed {computed}"
    )]
    BaseTaxMismatch {
        status: FilingStatus,
        min_income: Decimal,
        stated: Decimal,
        computed: Decimal,
    },

    #[error("Invalid tax tables: {0}")]
    Tables(#[from] TaxTablesError),
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
fn schedule_to_filing_status(schedule: &str) -> Option<FilingStatus> {
    match schedule.trim() {
        "X" => Some(FilingStatus::Single),
        "Y-1" => Some(FilingStatus::MarriedFilingJointly),
        "Y-2" => Some(FilingStatus::MarriedFilingSeparately),
        "Z" => Some(FilingStatus::HeadOfHousehold),
        _ => None,
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: the tax year (e.g. 2025)
/// - `schedule`: IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: lower bound of the bracket
/// - `max_income`: upper bound (empty for the top bracket)
/// - `rate`: marginal rate as a fraction (e.g. 0.10); required
/// - `base_tax`: optional; when present it is checked against the tax on
///   all lower brackets
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketTableRecord {
    pub tax_year: i32,
    pub schedule: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_amount")]
    pub max_income: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_required_amount")]
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub base_tax: Option<Decimal>,
}

/// Bracket tables read from a CSV, keyed by filing status.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedBrackets {
    pub tax_year: i32,
    pub tables: BTreeMap<FilingStatus, BracketTable>,
}

impl LoadedBrackets {
    /// Replaces the bracket tables of `base`, keeping its deductions and
    /// thresholds. Statuses absent from the CSV still fall back to Single.
    pub fn apply_to(
        self,
        base: &TaxTables,
    ) -> Result<TaxTables, BracketTableLoaderError> {
        Ok(base.with_brackets(self.tax_year, self.tables)?)
    }
}

/// Loader for bracket tables from CSV files.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketTableRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketTableRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by filing status and build one validated table per
    /// status.
    ///
    /// Rows may appear in any order; each group is sorted by `min_income`
    /// before the contiguity checks run.
    pub fn build(
        records: &[BracketTableRecord]
    ) -> Result<LoadedBrackets, BracketTableLoaderError> {
        let first = records.first().ok_or(BracketTableLoaderError::Empty)?;
        let tax_year = first.tax_year;

        let mut groups: BTreeMap<FilingStatus, Vec<&BracketTableRecord>> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            if record.tax_year != tax_year {
                return Err(BracketTableLoaderError::MixedTaxYears {
                    first: tax_year,
                    other: record.tax_year,
                });
            }
            let status = schedule_to_filing_status(&record.schedule).ok_or_else(|| {
                BracketTableLoaderError::InvalidSchedule {
                    schedule: record.schedule.clone(),
                    row: idx + 1,
                }
            })?;
            groups.entry(status).or_default().push(record);
        }

        let mut tables = BTreeMap::new();
        for (status, mut group) in groups {
            group.sort_by(|a, b| a.min_income.cmp(&b.min_income));

            let bands = group
                .iter()
                .map(|r| RateBand::new(r.rate, r.min_income, r.max_income))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| BracketTableLoaderError::InvalidTable { status, source })?;
            let table = BracketTable::new(bands)
                .map_err(|source| BracketTableLoaderError::InvalidTable { status, source })?;

            Self::check_base_tax(status, &table, &group)?;

            debug!(%status, bands = table.bands().len(), "built bracket table");
            tables.insert(status, table);
        }

        info!(tax_year, statuses = tables.len(), "loaded bracket tables");
        Ok(LoadedBrackets { tax_year, tables })
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<LoadedBrackets, BracketTableLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }

    /// Checks stated base taxes against the cumulative tax of the bands
    /// below each bracket.
    fn check_base_tax(
        status: FilingStatus,
        table: &BracketTable,
        records: &[&BracketTableRecord],
    ) -> Result<(), BracketTableLoaderError> {
        let mut computed = Decimal::ZERO;
        for (band, record) in table.bands().iter().zip(records) {
            if let Some(stated) = record.base_tax {
                if stated != computed {
                    return Err(BracketTableLoaderError::BaseTaxMismatch {
                        status,
                        min_income: band.from,
                        stated,
                        computed,
                    });
                }
            }
            if let Some(to) = band.to {
                computed += (to - band.from) * band.rate;
            }
        }
        Ok(())
    }
}

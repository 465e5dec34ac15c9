//! Ordinary income bracket apportionment.
//!
//! Taxable ordinary income is split across the progressive bands of a
//! [`BracketTable`]. The amount falling in each band is
//!
//! ```text
//! max(0, min(income, band.to) - band.from)
//! ```
//!
//! so bands wholly below the income contribute their full width, bands
//! above it contribute zero, and the band containing the last dollar
//! needs no special case.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{BracketTable, apportion};
//!
//! let table = BracketTable::from_thresholds(&[
//!     (dec!(0.10), Some(dec!(11925))),
//!     (dec!(0.12), Some(dec!(48475))),
//!     (dec!(0.22), None),
//! ])
//! .unwrap();
//!
//! let result = apportion(dec!(64250), &table);
//!
//! assert_eq!(result.rows[2].amount_in_band, dec!(15775));
//! assert_eq!(result.total_tax, dec!(9049.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::zero_floor;
use crate::{BracketTable, RateBand};

/// The share of taxable income falling in one band and the tax on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketRow {
    pub band: RateBand,
    pub amount_in_band: Decimal,
    pub tax_in_band: Decimal,
}

/// Per-band breakdown of ordinary income tax.
///
/// There is one row per band in table order, including bands the income
/// never reaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketResult {
    pub rows: Vec<BracketRow>,
    pub total_tax: Decimal,
}

impl BracketResult {
    /// Rate of the highest band holding a non-zero amount, or zero when
    /// there is no taxable income.
    pub fn marginal_rate(&self) -> Decimal {
        self.rows
            .iter()
            .rev()
            .find(|row| row.amount_in_band > Decimal::ZERO)
            .map_or(Decimal::ZERO, |row| row.band.rate)
    }
}

/// Amount of `income` that falls inside `band`.
pub fn amount_in_band(
    income: Decimal,
    band: &RateBand,
) -> Decimal {
    zero_floor(band.cap(income) - band.from)
}

/// Apportions `taxable_ordinary_income` across `table`.
///
/// `taxable_ordinary_income` must already be non-negative; callers floor it
/// at zero before calling.
pub fn apportion(
    taxable_ordinary_income: Decimal,
    table: &BracketTable,
) -> BracketResult {
    let rows: Vec<BracketRow> = table
        .bands()
        .iter()
        .map(|band| {
            let amount = amount_in_band(taxable_ordinary_income, band);
            BracketRow {
                band: band.clone(),
                amount_in_band: amount,
                tax_in_band: amount * band.rate,
            }
        })
        .collect();

    let total_tax = rows.iter().map(|row| row.tax_in_band).sum();

    BracketResult { rows, total_tax }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{Advisory, FilingStatus};

/// Largest accepted monetary entry, one quadrillion dollars.
///
/// Every sum and difference the estimate forms from entries at or below
/// this ceiling stays far inside the `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Raw entries for a single-year estimate.
///
/// Monetary fields are expected to lie in `[0, MAX_AMOUNT]`;
/// [`TaxInputs::clamped`] enforces that before the figures reach the
/// calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInputs {
    pub filing_status: FilingStatus,
    pub gross_wages: Decimal,
    /// Pre-tax retirement contributions (401k and similar).
    pub pretax_retirement: Decimal,
    pub other_pretax_deductions: Decimal,
    pub short_term_gains: Decimal,
    pub long_term_gains: Decimal,
    pub withheld: Decimal,
    /// Deduction to subtract from total income. `None` uses the standard
    /// deduction for the filing status.
    #[serde(default)]
    pub standard_deduction: Option<Decimal>,
}

impl TaxInputs {
    /// Inputs with every monetary field at zero.
    pub fn zero(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            gross_wages: Decimal::ZERO,
            pretax_retirement: Decimal::ZERO,
            other_pretax_deductions: Decimal::ZERO,
            short_term_gains: Decimal::ZERO,
            long_term_gains: Decimal::ZERO,
            withheld: Decimal::ZERO,
            standard_deduction: None,
        }
    }

    /// Returns a copy with each negative monetary field replaced by zero and
    /// each field above [`MAX_AMOUNT`] capped at it, plus one advisory per
    /// replaced field.
    pub fn clamped(&self) -> (Self, Vec<Advisory>) {
        let mut advisories = Vec::new();
        let mut clamp = |field: &str, value: Decimal| {
            if value < Decimal::ZERO {
                advisories.push(Advisory::NegativeInputClamped {
                    field: field.to_string(),
                    value,
                });
                Decimal::ZERO
            } else if value > MAX_AMOUNT {
                advisories.push(Advisory::AmountCapped {
                    field: field.to_string(),
                    value,
                    ceiling: MAX_AMOUNT,
                });
                MAX_AMOUNT
            } else {
                value
            }
        };

        let clamped = Self {
            filing_status: self.filing_status,
            gross_wages: clamp("gross_wages", self.gross_wages),
            pretax_retirement: clamp("pretax_retirement", self.pretax_retirement),
            other_pretax_deductions: clamp("other_pretax_deductions", self.other_pretax_deductions),
            short_term_gains: clamp("short_term_gains", self.short_term_gains),
            long_term_gains: clamp("long_term_gains", self.long_term_gains),
            withheld: clamp("withheld", self.withheld),
            standard_deduction: self
                .standard_deduction
                .map(|d| clamp("standard_deduction", d)),
        };

        (clamped, advisories)
    }
}

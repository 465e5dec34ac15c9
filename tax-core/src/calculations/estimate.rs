//! Single-year estimate: derives the income figures from raw inputs, runs
//! the bracket apportioner and the capital gains stacker, and settles the
//! result against withholding.
//!
//! | Step | Figure |
//! |------|--------|
//! | 1    | Adjusted wage income: gross wages - pre-tax retirement - other pre-tax deductions (min 0) |
//! | 2    | Total income: step 1 + short-term gains + long-term gains |
//! | 3    | Taxable income: step 2 - standard deduction (min 0) |
//! | 4    | Taxable ordinary income: step 3 - long-term gains (min 0) |
//! | 5    | Ordinary tax: step 4 apportioned across the filing status brackets |
//! | 6    | LTCG tax: long-term gains stacked on step 4 |
//! | 7    | Total tax: step 5 + step 6 |
//! | 8    | Refund (or amount due): withholding - step 7 |
//!
//! Short-term gains reach the ordinary brackets only through their
//! inclusion in total income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FilingStatus, Settlement, TaxInputs, TaxTables, estimate};
//!
//! let mut inputs = TaxInputs::zero(FilingStatus::Single);
//! inputs.gross_wages = dec!(80000);
//! inputs.withheld = dec!(9000);
//!
//! let result = estimate(&inputs, TaxTables::builtin());
//!
//! assert_eq!(result.taxable_income, dec!(64250));
//! assert_eq!(result.total_tax, dec!(9049.00));
//! assert_eq!(result.settlement(), Settlement::AmountDue(dec!(49.00)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::brackets::{BracketResult, apportion};
use crate::calculations::capital_gains::{LtcgResult, stack};
use crate::calculations::common::{min, zero_floor};
use crate::{Advisory, FilingStatus, TaxInputs, TaxTables};

/// Whether withholding covers the estimated tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "camelCase")]
pub enum Settlement {
    Refund(Decimal),
    AmountDue(Decimal),
}

impl Settlement {
    /// Non-negative `refund_or_due` is a refund; negative is an amount due.
    pub fn from_refund_or_due(refund_or_due: Decimal) -> Self {
        if refund_or_due >= Decimal::ZERO {
            Self::Refund(refund_or_due)
        } else {
            Self::AmountDue(-refund_or_due)
        }
    }
}

/// Everything an estimate produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEstimate {
    /// Inputs after negative entries were floored at zero.
    pub inputs: TaxInputs,
    pub tax_year: i32,
    /// Filing status whose brackets were applied.
    pub bracket_status: FilingStatus,
    pub standard_deduction: Decimal,
    pub adjusted_wage_income: Decimal,
    pub total_income: Decimal,
    pub taxable_income: Decimal,
    pub taxable_ordinary_income: Decimal,
    pub ordinary: BracketResult,
    pub ltcg: LtcgResult,
    pub total_tax: Decimal,
    pub refund_or_due: Decimal,
    pub advisories: Vec<Advisory>,
}

impl TaxEstimate {
    pub fn settlement(&self) -> Settlement {
        Settlement::from_refund_or_due(self.refund_or_due)
    }

    /// Total tax as a share of total income; zero when there is no income.
    pub fn effective_rate(&self) -> Decimal {
        if self.total_income.is_zero() {
            Decimal::ZERO
        } else {
            self.total_tax / self.total_income
        }
    }

    /// Rate on the last dollar of ordinary taxable income.
    pub fn marginal_rate(&self) -> Decimal {
        self.ordinary.marginal_rate()
    }

    /// Long-term gains that fall under the standard deduction and so never
    /// reach the LTCG tiers.
    pub fn ltcg_absorbed_by_deduction(&self) -> Decimal {
        self.inputs.long_term_gains
            - (self.ltcg.amount_at_0 + self.ltcg.amount_at_15 + self.ltcg.amount_at_20)
    }

    pub fn used_fallback_brackets(&self) -> bool {
        self.bracket_status != self.inputs.filing_status
    }
}

/// Adjusted wage income, and whether the deductions exceeded gross wages.
pub fn adjusted_wage_income(inputs: &TaxInputs) -> (Decimal, Option<Advisory>) {
    let unclamped = inputs.gross_wages - inputs.pretax_retirement - inputs.other_pretax_deductions;
    if unclamped < Decimal::ZERO {
        (Decimal::ZERO, Some(Advisory::WageIncomeClamped { unclamped }))
    } else {
        (unclamped, None)
    }
}

/// Runs a full estimate for `inputs` against `tables`.
///
/// Negative monetary inputs are treated as zero and reported as advisories,
/// so the calculators only ever see non-negative amounts.
pub fn estimate(
    inputs: &TaxInputs,
    tables: &TaxTables,
) -> TaxEstimate {
    let (inputs, mut advisories) = inputs.clamped();
    let status = inputs.filing_status;

    let (adjusted_wage_income, wage_advisory) = adjusted_wage_income(&inputs);
    advisories.extend(wage_advisory);

    let total_income = adjusted_wage_income + inputs.short_term_gains + inputs.long_term_gains;

    let standard_deduction = inputs
        .standard_deduction
        .unwrap_or_else(|| tables.standard_deduction(status));
    let taxable_income = zero_floor(total_income - standard_deduction);
    let taxable_ordinary_income = zero_floor(taxable_income - inputs.long_term_gains);

    debug!(
        %adjusted_wage_income,
        %total_income,
        %standard_deduction,
        %taxable_income,
        %taxable_ordinary_income,
        "derived income figures"
    );

    let selection = tables.bracket_table(status);
    advisories.extend(selection.advisory());
    let ordinary = apportion(taxable_ordinary_income, selection.table);

    // The deduction can absorb part of the gains; only what remains in
    // taxable income is stacked.
    let ltcg_in_taxable = min(inputs.long_term_gains, taxable_income);
    let ltcg = stack(
        taxable_income,
        ltcg_in_taxable,
        tables.ltcg_thresholds(status),
    );

    let total_tax = ordinary.total_tax + ltcg.total_tax;
    let refund_or_due = inputs.withheld - total_tax;

    debug!(
        ordinary_tax = %ordinary.total_tax,
        ltcg_tax = %ltcg.total_tax,
        %total_tax,
        %refund_or_due,
        "estimate complete"
    );
    for advisory in &advisories {
        warn!(%advisory, "estimate advisory");
    }

    TaxEstimate {
        tax_year: tables.tax_year(),
        bracket_status: selection.used,
        standard_deduction,
        adjusted_wage_income,
        total_income,
        taxable_income,
        taxable_ordinary_income,
        ordinary,
        ltcg,
        total_tax,
        refund_or_due,
        advisories,
        inputs,
    }
}

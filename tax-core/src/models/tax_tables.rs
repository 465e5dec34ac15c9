use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Advisory, BracketTable, FilingStatus, LtcgThresholds};

/// Errors that can occur when assembling a set of tax tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTablesError {
    /// Every other status falls back to the Single table, so it must exist.
    #[error("no bracket table for Single filers")]
    MissingSingleBrackets,

    #[error("standard deduction for {status} must be non-negative, got {amount}")]
    NegativeDeduction {
        status: FilingStatus,
        amount: Decimal,
    },

    #[error("LTCG thresholds for {status} must be non-negative, got {zero} / {fifteen}")]
    NegativeLtcgThreshold {
        status: FilingStatus,
        zero: Decimal,
        fifteen: Decimal,
    },

    #[error("LTCG 0% ceiling {zero} exceeds 15% ceiling {fifteen} for {status}")]
    UnorderedLtcgThresholds {
        status: FilingStatus,
        zero: Decimal,
        fifteen: Decimal,
    },
}

/// One value per filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerStatus<T> {
    pub single: T,
    #[serde(alias = "married_filing_jointly")]
    pub married_filing_jointly: T,
    #[serde(alias = "married_filing_separately")]
    pub married_filing_separately: T,
    #[serde(alias = "head_of_household")]
    pub head_of_household: T,
}

impl<T> PerStatus<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::all().iter().map(move |s| (*s, self.get(*s)))
    }
}

/// The bracket table chosen for a filing status.
#[derive(Debug, Clone, Copy)]
pub struct BracketSelection<'a> {
    pub table: &'a BracketTable,
    pub requested: FilingStatus,
    pub used: FilingStatus,
}

impl BracketSelection<'_> {
    pub fn is_fallback(&self) -> bool {
        self.requested != self.used
    }

    /// The advisory to surface when the Single table stood in for another
    /// status.
    pub fn advisory(&self) -> Option<Advisory> {
        self.is_fallback().then_some(Advisory::BracketFallback {
            requested: self.requested,
            used: self.used,
        })
    }
}

/// Per-status configuration consumed by an estimate: bracket tables,
/// standard deductions and LTCG thresholds for one tax year.
///
/// Bracket tables may be missing for any status except Single; lookups for
/// a missing status return the Single table flagged as a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxTables {
    tax_year: i32,
    brackets: BTreeMap<FilingStatus, BracketTable>,
    standard_deductions: PerStatus<Decimal>,
    ltcg_thresholds: PerStatus<LtcgThresholds>,
}

static BUILTIN_2025: LazyLock<TaxTables> = LazyLock::new(|| {
    let single = BracketTable::from_thresholds(&[
        (dec!(0.10), Some(dec!(11925))),
        (dec!(0.12), Some(dec!(48475))),
        (dec!(0.22), Some(dec!(103350))),
        (dec!(0.24), Some(dec!(197300))),
        (dec!(0.32), Some(dec!(250525))),
        (dec!(0.35), Some(dec!(626350))),
        (dec!(0.37), None),
    ])
    .expect("built-in 2025 Single brackets are contiguous");

    TaxTables::new(
        2025,
        BTreeMap::from([(FilingStatus::Single, single)]),
        PerStatus {
            single: dec!(15750),
            married_filing_jointly: dec!(31500),
            married_filing_separately: dec!(15750),
            head_of_household: dec!(23625),
        },
        PerStatus {
            single: LtcgThresholds::new(dec!(48350), dec!(533400)),
            married_filing_jointly: LtcgThresholds::new(dec!(96700), dec!(600050)),
            married_filing_separately: LtcgThresholds::new(dec!(48350), dec!(300000)),
            head_of_household: LtcgThresholds::new(dec!(64750), dec!(566700)),
        },
    )
    .expect("built-in 2025 tables are valid")
});

impl TaxTables {
    pub fn new(
        tax_year: i32,
        brackets: BTreeMap<FilingStatus, BracketTable>,
        standard_deductions: PerStatus<Decimal>,
        ltcg_thresholds: PerStatus<LtcgThresholds>,
    ) -> Result<Self, TaxTablesError> {
        if !brackets.contains_key(&FilingStatus::Single) {
            return Err(TaxTablesError::MissingSingleBrackets);
        }

        for (status, &amount) in standard_deductions.iter() {
            if amount < Decimal::ZERO {
                return Err(TaxTablesError::NegativeDeduction { status, amount });
            }
        }

        for (status, t) in ltcg_thresholds.iter() {
            let (zero, fifteen) = (t.zero_rate_ceiling, t.fifteen_rate_ceiling);
            if zero < Decimal::ZERO || fifteen < Decimal::ZERO {
                return Err(TaxTablesError::NegativeLtcgThreshold {
                    status,
                    zero,
                    fifteen,
                });
            }
            if zero > fifteen {
                return Err(TaxTablesError::UnorderedLtcgThresholds {
                    status,
                    zero,
                    fifteen,
                });
            }
        }

        Ok(Self {
            tax_year,
            brackets,
            standard_deductions,
            ltcg_thresholds,
        })
    }

    /// The built-in 2025 tables. Only Single has a bracket table.
    pub fn builtin() -> &'static TaxTables {
        &BUILTIN_2025
    }

    /// Returns a copy with the bracket tables replaced.
    pub fn with_brackets(
        &self,
        tax_year: i32,
        brackets: BTreeMap<FilingStatus, BracketTable>,
    ) -> Result<Self, TaxTablesError> {
        Self::new(
            tax_year,
            brackets,
            self.standard_deductions,
            self.ltcg_thresholds,
        )
    }

    /// Returns a copy with the standard deductions and LTCG thresholds
    /// replaced.
    pub fn with_amounts(
        &self,
        standard_deductions: PerStatus<Decimal>,
        ltcg_thresholds: PerStatus<LtcgThresholds>,
    ) -> Result<Self, TaxTablesError> {
        Self::new(
            self.tax_year,
            self.brackets.clone(),
            standard_deductions,
            ltcg_thresholds,
        )
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn brackets(&self) -> &BTreeMap<FilingStatus, BracketTable> {
        &self.brackets
    }

    pub fn standard_deductions(&self) -> &PerStatus<Decimal> {
        &self.standard_deductions
    }

    pub fn all_ltcg_thresholds(&self) -> &PerStatus<LtcgThresholds> {
        &self.ltcg_thresholds
    }

    /// Selects the bracket table for `status`, falling back to Single.
    pub fn bracket_table(
        &self,
        status: FilingStatus,
    ) -> BracketSelection<'_> {
        match self.brackets.get(&status) {
            Some(table) => BracketSelection {
                table,
                requested: status,
                used: status,
            },
            None => BracketSelection {
                // present by construction
                table: &self.brackets[&FilingStatus::Single],
                requested: status,
                used: FilingStatus::Single,
            },
        }
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        *self.standard_deductions.get(status)
    }

    pub fn ltcg_thresholds(
        &self,
        status: FilingStatus,
    ) -> LtcgThresholds {
        *self.ltcg_thresholds.get(status)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_has_single_brackets_for_2025() {
        let tables = TaxTables::builtin();

        assert_eq!(tables.tax_year(), 2025);
        let selection = tables.bracket_table(FilingStatus::Single);
        assert!(!selection.is_fallback());
        assert_eq!(selection.table.bands().len(), 7);
        assert_eq!(selection.table.bands()[6].from, dec!(626350));
        assert_eq!(selection.table.bands()[6].to, None);
    }

    #[test]
    fn other_statuses_fall_back_to_single_brackets() {
        let tables = TaxTables::builtin();

        for status in [
            FilingStatus::MarriedFilingJointly,
            FilingStatus::MarriedFilingSeparately,
            FilingStatus::HeadOfHousehold,
        ] {
            let selection = tables.bracket_table(status);

            assert!(selection.is_fallback());
            assert_eq!(selection.used, FilingStatus::Single);
            assert_eq!(
                selection.advisory(),
                Some(Advisory::BracketFallback {
                    requested: status,
                    used: FilingStatus::Single,
                })
            );
        }
    }

    #[test]
    fn builtin_deductions_and_thresholds_are_per_status() {
        let tables = TaxTables::builtin();

        assert_eq!(tables.standard_deduction(FilingStatus::Single), dec!(15750));
        assert_eq!(
            tables.standard_deduction(FilingStatus::MarriedFilingJointly),
            dec!(31500)
        );
        assert_eq!(
            tables.standard_deduction(FilingStatus::HeadOfHousehold),
            dec!(23625)
        );
        assert_eq!(
            tables.ltcg_thresholds(FilingStatus::Single),
            LtcgThresholds::new(dec!(48350), dec!(533400))
        );
        assert_eq!(
            tables.ltcg_thresholds(FilingStatus::MarriedFilingSeparately),
            LtcgThresholds::new(dec!(48350), dec!(300000))
        );
    }

    #[test]
    fn new_requires_single_brackets() {
        let builtin = TaxTables::builtin();

        let result = builtin.with_brackets(2025, BTreeMap::new());

        assert_eq!(result, Err(TaxTablesError::MissingSingleBrackets));
    }

    #[test]
    fn new_rejects_unordered_ltcg_thresholds() {
        let builtin = TaxTables::builtin();
        let mut thresholds = *builtin.all_ltcg_thresholds();
        thresholds.head_of_household = LtcgThresholds::new(dec!(600000), dec!(500000));

        let result = builtin.with_amounts(*builtin.standard_deductions(), thresholds);

        assert_eq!(
            result,
            Err(TaxTablesError::UnorderedLtcgThresholds {
                status: FilingStatus::HeadOfHousehold,
                zero: dec!(600000),
                fifteen: dec!(500000),
            })
        );
    }

    #[test]
    fn new_rejects_negative_deduction() {
        let builtin = TaxTables::builtin();
        let mut deductions = *builtin.standard_deductions();
        deductions.married_filing_jointly = dec!(-1);

        let result = builtin.with_amounts(deductions, *builtin.all_ltcg_thresholds());

        assert_eq!(
            result,
            Err(TaxTablesError::NegativeDeduction {
                status: FilingStatus::MarriedFilingJointly,
                amount: dec!(-1),
            })
        );
    }
}

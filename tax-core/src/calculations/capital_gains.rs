//! Long-term capital gains stacking.
//!
//! LTCG dollars sit on top of ordinary taxable income: they occupy the range
//! from `ordinary_taxable` to `ordinary_taxable + ltcg`, and each dollar is
//! taxed at 0%, 15% or 20% according to where it lands relative to the
//! [`LtcgThresholds`]. The ordinary brackets play no part in the rate.
//!
//! The lower tiers are always filled first:
//!
//! 1. `room_at_0 = max(zero_ceiling - ordinary_taxable, 0)`
//! 2. `room_at_15 = max(fifteen_ceiling - max(ordinary_taxable, zero_ceiling), 0)`
//! 3. whatever is left is taxed at 20%.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{LtcgThresholds, stack};
//!
//! let thresholds = LtcgThresholds::new(dec!(48350), dec!(533400));
//! let result = stack(dec!(600000), dec!(500000), thresholds);
//!
//! assert_eq!(result.amount_at_0, dec!(0));
//! assert_eq!(result.amount_at_15, dec!(433400));
//! assert_eq!(result.amount_at_20, dec!(66600));
//! assert_eq!(result.total_tax, dec!(78330));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::LtcgThresholds;
use crate::calculations::common::{max, min, zero_floor};

pub const LTCG_RATE_15: Decimal = dec!(0.15);
pub const LTCG_RATE_20: Decimal = dec!(0.20);

/// How a long-term gain splits across the three rate tiers.
///
/// `amount_at_0 + amount_at_15 + amount_at_20` always equals the gain
/// passed to [`stack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LtcgResult {
    pub amount_at_0: Decimal,
    pub amount_at_15: Decimal,
    pub amount_at_20: Decimal,
    pub total_tax: Decimal,
}

/// Room left in the 0% tier once ordinary income is placed.
pub fn room_at_0(
    ordinary_taxable: Decimal,
    thresholds: &LtcgThresholds,
) -> Decimal {
    zero_floor(thresholds.zero_rate_ceiling - ordinary_taxable)
}

/// Room in the 15% tier above both ordinary income and the 0% ceiling.
pub fn room_at_15(
    ordinary_taxable: Decimal,
    thresholds: &LtcgThresholds,
) -> Decimal {
    let start = max(ordinary_taxable, thresholds.zero_rate_ceiling);
    zero_floor(thresholds.fifteen_rate_ceiling - start)
}

/// Splits `ltcg_amount` across the LTCG tiers.
///
/// Requires `0 <= ltcg_amount <= total_taxable_income`; the ordinary part of
/// taxable income is the difference.
pub fn stack(
    total_taxable_income: Decimal,
    ltcg_amount: Decimal,
    thresholds: LtcgThresholds,
) -> LtcgResult {
    let ordinary_taxable = total_taxable_income - ltcg_amount;

    let amount_at_0 = min(ltcg_amount, room_at_0(ordinary_taxable, &thresholds));
    let remaining = ltcg_amount - amount_at_0;

    let amount_at_15 = min(remaining, room_at_15(ordinary_taxable, &thresholds));
    let amount_at_20 = remaining - amount_at_15;

    LtcgResult {
        amount_at_0,
        amount_at_15,
        amount_at_20,
        total_tax: amount_at_15 * LTCG_RATE_15 + amount_at_20 * LTCG_RATE_20,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn single() -> LtcgThresholds {
        LtcgThresholds::new(dec!(48350), dec!(533400))
    }

    // =========================================================================
    // room tests
    // =========================================================================

    #[test]
    fn room_at_0_shrinks_as_ordinary_income_grows() {
        assert_eq!(room_at_0(dec!(0), &single()), dec!(48350));
        assert_eq!(room_at_0(dec!(40000), &single()), dec!(8350));
        assert_eq!(room_at_0(dec!(100000), &single()), dec!(0));
    }

    #[test]
    fn room_at_15_starts_at_zero_ceiling_for_low_ordinary_income() {
        assert_eq!(room_at_15(dec!(0), &single()), dec!(485050));
        assert_eq!(room_at_15(dec!(100000), &single()), dec!(433400));
        assert_eq!(room_at_15(dec!(600000), &single()), dec!(0));
    }

    // =========================================================================
    // stack tests
    // =========================================================================

    #[test]
    fn stack_zero_gain_is_untaxed() {
        let result = stack(dec!(75000), dec!(0), single());

        assert_eq!(
            result,
            LtcgResult {
                amount_at_0: dec!(0),
                amount_at_15: dec!(0),
                amount_at_20: dec!(0),
                total_tax: dec!(0),
            }
        );
    }

    #[test]
    fn stack_gain_entirely_in_zero_tier() {
        let result = stack(dec!(30000), dec!(10000), single());

        assert_eq!(result.amount_at_0, dec!(10000));
        assert_eq!(result.total_tax, dec!(0));
    }

    #[test]
    fn stack_gain_straddles_zero_and_fifteen_tiers() {
        // Ordinary 40000 leaves 8350 at 0%; the other 11650 is at 15%.
        let result = stack(dec!(60000), dec!(20000), single());

        assert_eq!(result.amount_at_0, dec!(8350));
        assert_eq!(result.amount_at_15, dec!(11650));
        assert_eq!(result.amount_at_20, dec!(0));
        assert_eq!(result.total_tax, dec!(1747.50));
    }

    #[test]
    fn stack_large_gain_with_ordinary_income_above_zero_ceiling() {
        let result = stack(dec!(600000), dec!(500000), single());

        assert_eq!(result.amount_at_0, dec!(0));
        assert_eq!(result.amount_at_15, dec!(433400));
        assert_eq!(result.amount_at_20, dec!(66600));
        assert_eq!(result.total_tax, dec!(78330));
    }

    #[test]
    fn stack_all_gains_at_twenty_when_ordinary_above_fifteen_ceiling() {
        let result = stack(dec!(700000), dec!(50000), single());

        assert_eq!(result.amount_at_0, dec!(0));
        assert_eq!(result.amount_at_15, dec!(0));
        assert_eq!(result.amount_at_20, dec!(50000));
        assert_eq!(result.total_tax, dec!(10000));
    }

    #[test]
    fn stack_huge_gain_with_no_ordinary_income_fills_every_tier() {
        let result = stack(dec!(1000000), dec!(1000000), single());

        assert_eq!(result.amount_at_0, dec!(48350));
        assert_eq!(result.amount_at_15, dec!(485050));
        assert_eq!(result.amount_at_20, dec!(466600));
        // 485050 x 15% + 466600 x 20%
        assert_eq!(result.total_tax, dec!(166077.50));
    }

    #[test]
    fn stack_ordinary_income_exactly_at_zero_ceiling() {
        let result = stack(dec!(58350), dec!(10000), single());

        assert_eq!(result.amount_at_0, dec!(0));
        assert_eq!(result.amount_at_15, dec!(10000));
    }
}

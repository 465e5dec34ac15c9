//! Numeric helpers shared by the bracket apportioner, the capital gains
//! stacker and the estimate.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with midpoints rounded away from zero.
///
/// Calculations stay exact; this is applied only when figures are shown.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3470.505)), dec!(3470.51));
/// assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the smaller of two values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Floors a value at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::zero_floor;
///
/// assert_eq!(zero_floor(dec!(-250.00)), dec!(0));
/// assert_eq!(zero_floor(dec!(64250)), dec!(64250));
/// ```
pub fn zero_floor(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_midpoint_up() {
        assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn round_half_up_rounds_below_midpoint_down() {
        assert_eq!(round_half_up(dec!(9049.004)), dec!(9049.00));
    }

    #[test]
    fn round_half_up_moves_negative_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn round_half_up_keeps_whole_amounts() {
        assert_eq!(round_half_up(dec!(78330)), dec!(78330));
    }

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_picks_larger_value() {
        assert_eq!(max(dec!(48350), dec!(100000)), dec!(100000));
        assert_eq!(max(dec!(100000), dec!(48350)), dec!(100000));
    }

    #[test]
    fn min_picks_smaller_value() {
        assert_eq!(min(dec!(500000), dec!(433400)), dec!(433400));
        assert_eq!(min(dec!(433400), dec!(500000)), dec!(433400));
    }

    #[test]
    fn max_and_min_agree_on_equal_values() {
        assert_eq!(max(dec!(11925), dec!(11925)), dec!(11925));
        assert_eq!(min(dec!(11925), dec!(11925)), dec!(11925));
    }

    // =========================================================================
    // zero_floor tests
    // =========================================================================

    #[test]
    fn zero_floor_clamps_negative_to_zero() {
        assert_eq!(zero_floor(dec!(-51650)), dec!(0));
    }

    #[test]
    fn zero_floor_keeps_zero_and_positive() {
        assert_eq!(zero_floor(dec!(0)), dec!(0));
        assert_eq!(zero_floor(dec!(0.01)), dec!(0.01));
    }
}

//! Property tests for the bracket apportioner and the capital gains stacker.

use proptest::prelude::{ProptestConfig, prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use tax_core::calculations::capital_gains::{room_at_0, room_at_15};
use tax_core::{
    BracketTable, FilingStatus, LtcgThresholds, TaxInputs, TaxTables, apportion, estimate, stack,
};

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn single_brackets() -> &'static BracketTable {
    TaxTables::builtin()
        .bracket_table(FilingStatus::Single)
        .table
}

/// A contiguous table built from band widths and rates in basis points.
fn table_from(
    widths: &[u32],
    rates_bp: &[u32],
    top_rate_bp: u32,
) -> BracketTable {
    let mut bands = Vec::new();
    let mut upper = Decimal::ZERO;
    for (&width, &rate) in widths.iter().zip(rates_bp) {
        upper += Decimal::from(width);
        bands.push((Decimal::new(rate.into(), 4), Some(upper)));
    }
    bands.push((Decimal::new(top_rate_bp.into(), 4), None));
    BracketTable::from_thresholds(&bands).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_total_tax_is_sum_of_band_taxes(income in 0u64..200_000_000) {
        let result = apportion(cents(income), single_brackets());

        let recomputed: Decimal = result
            .rows
            .iter()
            .map(|r| r.amount_in_band * r.band.rate)
            .sum();
        prop_assert_eq!(result.total_tax, recomputed);
    }

    #[test]
    fn prop_band_amounts_sum_to_income(
        widths in proptest::collection::vec(1u32..100_000, 1..8),
        rates in proptest::collection::vec(0u32..=10_000, 8),
        top_rate in 0u32..=10_000,
        income in 0u64..100_000_000,
    ) {
        let table = table_from(&widths, &rates, top_rate);

        let result = apportion(cents(income), &table);

        let total: Decimal = result.rows.iter().map(|r| r.amount_in_band).sum();
        prop_assert_eq!(total, cents(income));
        prop_assert_eq!(result.rows.len(), table.bands().len());
    }

    #[test]
    fn prop_apportion_is_monotonic(a in 0u64..200_000_000, b in 0u64..200_000_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_tax = apportion(cents(low), single_brackets()).total_tax;
        let high_tax = apportion(cents(high), single_brackets()).total_tax;

        prop_assert!(low_tax <= high_tax);
    }

    #[test]
    fn prop_stack_conserves_gain(
        ordinary in 0u64..100_000_000,
        gain in 0u64..100_000_000,
        zero_ceiling in 0u64..20_000_000,
        fifteen_extra in 0u64..80_000_000,
    ) {
        let thresholds = LtcgThresholds::new(
            cents(zero_ceiling),
            cents(zero_ceiling + fifteen_extra),
        );

        let result = stack(cents(ordinary + gain), cents(gain), thresholds);

        prop_assert_eq!(
            result.amount_at_0 + result.amount_at_15 + result.amount_at_20,
            cents(gain)
        );
        prop_assert!(result.amount_at_0 >= Decimal::ZERO);
        prop_assert!(result.amount_at_15 >= Decimal::ZERO);
        prop_assert!(result.amount_at_20 >= Decimal::ZERO);
    }

    #[test]
    fn prop_stack_fills_lower_tiers_first(
        ordinary in 0u64..100_000_000,
        gain in 0u64..100_000_000,
    ) {
        let thresholds = TaxTables::builtin().ltcg_thresholds(FilingStatus::Single);
        let ordinary = cents(ordinary);

        let result = stack(ordinary + cents(gain), cents(gain), thresholds);

        if result.amount_at_20 > Decimal::ZERO {
            prop_assert_eq!(result.amount_at_0, room_at_0(ordinary, &thresholds));
            prop_assert_eq!(result.amount_at_15, room_at_15(ordinary, &thresholds));
        }
        if result.amount_at_15 > Decimal::ZERO {
            prop_assert_eq!(result.amount_at_0, room_at_0(ordinary, &thresholds));
        }
    }

    #[test]
    fn prop_stack_zero_gain_is_untaxed(ordinary in 0u64..100_000_000) {
        let thresholds = TaxTables::builtin().ltcg_thresholds(FilingStatus::Single);

        let result = stack(cents(ordinary), Decimal::ZERO, thresholds);

        prop_assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn prop_estimate_settles_against_withholding(
        gross in 0u64..50_000_000,
        retirement in 0u64..5_000_000,
        short_term in 0u64..10_000_000,
        long_term in 0u64..50_000_000,
        withheld in 0u64..10_000_000,
    ) {
        let mut inputs = TaxInputs::zero(FilingStatus::Single);
        inputs.gross_wages = cents(gross);
        inputs.pretax_retirement = cents(retirement);
        inputs.short_term_gains = cents(short_term);
        inputs.long_term_gains = cents(long_term);
        inputs.withheld = cents(withheld);

        let result = estimate(&inputs, TaxTables::builtin());

        prop_assert_eq!(result.total_tax, result.ordinary.total_tax + result.ltcg.total_tax);
        prop_assert_eq!(result.refund_or_due, cents(withheld) - result.total_tax);
        prop_assert!(result.taxable_ordinary_income <= result.taxable_income);
        prop_assert!(result.total_tax >= Decimal::ZERO);
    }
}

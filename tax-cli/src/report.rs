//! Text rendering of estimates and tables.

use std::fmt::Write;

use rust_decimal::Decimal;
use tax_core::calculations::capital_gains::{LTCG_RATE_15, LTCG_RATE_20};
use tax_core::calculations::common::round_half_up;
use tax_core::{BracketTable, FilingStatus, Settlement, TaxEstimate, TaxTables};

/// Formats an amount as US dollars, e.g. `$1,234.56` or `-$49.00`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// Formats a fractional rate as a percentage, e.g. `0.22` as `22%` and
/// `0.113112` as `11.31%`.
pub fn format_rate(rate: Decimal) -> String {
    let percent = round_half_up(rate * Decimal::ONE_HUNDRED).normalize();
    format!("{percent}%")
}

fn format_band_range(
    from: Decimal,
    to: Option<Decimal>,
) -> String {
    match to {
        Some(to) => format!("{} - {}", format_usd(from), format_usd(to)),
        None => format!("{} and up", format_usd(from)),
    }
}

/// Renders a full estimate report.
pub fn render_estimate(estimate: &TaxEstimate) -> String {
    let mut out = String::new();
    let inputs = &estimate.inputs;

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "Tax year {} estimate ({})",
        estimate.tax_year, inputs.filing_status
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Income");
    let lines = [
        ("Gross wages", inputs.gross_wages),
        ("Pre-tax retirement", inputs.pretax_retirement),
        ("Other pre-tax deductions", inputs.other_pretax_deductions),
        ("Adjusted wage income", estimate.adjusted_wage_income),
        ("Short-term gains", inputs.short_term_gains),
        ("Long-term gains", inputs.long_term_gains),
        ("Total income", estimate.total_income),
        ("Standard deduction", estimate.standard_deduction),
        ("Taxable income", estimate.taxable_income),
        ("Taxable ordinary income", estimate.taxable_ordinary_income),
    ];
    for (label, amount) in lines {
        let _ = writeln!(out, "  {label:<26}{:>16}", format_usd(amount));
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Ordinary income brackets ({})",
        estimate.bracket_status
    );
    for row in &estimate.ordinary.rows {
        let _ = writeln!(
            out,
            "  {:>6}  {:<32}{:>16}{:>14}",
            format_rate(row.band.rate),
            format_band_range(row.band.from, row.band.to),
            format_usd(row.amount_in_band),
            format_usd(row.tax_in_band),
        );
    }
    let _ = writeln!(
        out,
        "  {:<40}{:>30}",
        "Ordinary income tax",
        format_usd(estimate.ordinary.total_tax)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Long-term capital gains");
    let ltcg = &estimate.ltcg;
    let tiers = [
        ("0%", ltcg.amount_at_0, Decimal::ZERO),
        ("15%", ltcg.amount_at_15, ltcg.amount_at_15 * LTCG_RATE_15),
        ("20%", ltcg.amount_at_20, ltcg.amount_at_20 * LTCG_RATE_20),
    ];
    for (label, amount, tax) in tiers {
        let _ = writeln!(
            out,
            "  {label:>6}  {:<32}{:>16}{:>14}",
            "",
            format_usd(amount),
            format_usd(tax)
        );
    }
    let absorbed = estimate.ltcg_absorbed_by_deduction();
    if absorbed > Decimal::ZERO {
        let _ = writeln!(
            out,
            "  {:>6}  {:<32}{:>16}{:>14}",
            "",
            "Absorbed by deduction",
            format_usd(absorbed),
            format_usd(Decimal::ZERO)
        );
    }
    let _ = writeln!(
        out,
        "  {:<40}{:>30}",
        "Capital gains tax",
        format_usd(ltcg.total_tax)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "  {:<26}{:>16}", "Total tax", format_usd(estimate.total_tax));
    let _ = writeln!(out, "  {:<26}{:>16}", "Withheld", format_usd(inputs.withheld));
    let (label, amount) = match estimate.settlement() {
        Settlement::Refund(amount) => ("Refund", amount),
        Settlement::AmountDue(amount) => ("Amount due", amount),
    };
    let _ = writeln!(out, "  {label:<26}{:>16}", format_usd(amount));
    let _ = writeln!(
        out,
        "  {:<26}{:>16}",
        "Effective rate",
        format_rate(estimate.effective_rate())
    );
    let _ = writeln!(
        out,
        "  {:<26}{:>16}",
        "Marginal rate",
        format_rate(estimate.marginal_rate())
    );

    if !estimate.advisories.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notes");
        for advisory in &estimate.advisories {
            let _ = writeln!(out, "  * {advisory}");
        }
    }

    out
}

fn render_bracket_table(
    out: &mut String,
    table: &BracketTable,
) {
    for band in table.bands() {
        let _ = writeln!(
            out,
            "  {:>6}  {}",
            format_rate(band.rate),
            format_band_range(band.from, band.to)
        );
    }
}

/// Renders the tables for `statuses`.
pub fn render_tables(
    tables: &TaxTables,
    statuses: &[FilingStatus],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tax year {}", tables.tax_year());

    for &status in statuses {
        let _ = writeln!(out);
        let _ = writeln!(out, "{status} ({})", status.as_str());
        let _ = writeln!(
            out,
            "  Standard deduction: {}",
            format_usd(tables.standard_deduction(status))
        );
        let thresholds = tables.ltcg_thresholds(status);
        let _ = writeln!(
            out,
            "  LTCG 0% up to {}, 15% up to {}, 20% above",
            format_usd(thresholds.zero_rate_ceiling),
            format_usd(thresholds.fifteen_rate_ceiling)
        );

        let selection = tables.bracket_table(status);
        if selection.is_fallback() {
            let _ = writeln!(out, "  Brackets ({} table used):", selection.used);
        } else {
            let _ = writeln!(out, "  Brackets:");
        }
        render_bracket_table(&mut out, selection.table);
    }

    out
}

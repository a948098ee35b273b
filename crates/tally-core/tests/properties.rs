//! Property-based tests for the line calculator and header aggregator.
//!
//! Run with: `cargo test -p tally-core --test properties`

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::{calculate_header_totals, calculate_line, LineTotals};

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// A price between 0.00 and 99999.99.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// A quantity between 0.000 and 9999.999 (fractional units included).
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|milli| Decimal::new(milli as i64, 3))
}

/// A tax percentage between 0.00 and 100.00.
fn arb_tax_percentage() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|bps| Decimal::new(bps as i64, 2))
}

/// An absolute discount between 0.00 and 199999.99.
fn arb_discount() -> impl Strategy<Value = Decimal> {
    (0u64..20_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

fn arb_line() -> impl Strategy<Value = LineTotals> {
    (arb_quantity(), arb_price(), arb_tax_percentage(), arb_discount())
        .prop_map(|(q, p, t, d)| calculate_line(q, p, t, d))
}

// ── Line Calculator ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn subtotal_is_exact_product(q in arb_quantity(), p in arb_price(), t in arb_tax_percentage(), d in arb_discount()) {
        let totals = calculate_line(q, p, t, d);
        prop_assert_eq!(totals.subtotal, q * p);
    }

    #[test]
    fn discount_at_or_above_subtotal_zeroes_tax(q in arb_quantity(), p in arb_price(), t in arb_tax_percentage(), extra in arb_discount()) {
        let subtotal = q * p;
        let totals = calculate_line(q, p, t, subtotal + extra);
        prop_assert_eq!(totals.taxable_base, Decimal::ZERO);
        prop_assert_eq!(totals.tax, Decimal::ZERO);
        prop_assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn zero_tax_means_total_equals_base(q in arb_quantity(), p in arb_price(), d in arb_discount()) {
        let totals = calculate_line(q, p, Decimal::ZERO, d);
        prop_assert_eq!(totals.tax, Decimal::ZERO);
        prop_assert_eq!(totals.total, totals.taxable_base);
    }

    #[test]
    fn taxable_base_never_negative(q in arb_quantity(), p in arb_price(), t in arb_tax_percentage(), d in arb_discount()) {
        let totals = calculate_line(q, p, t, d);
        prop_assert!(totals.taxable_base >= Decimal::ZERO);
        prop_assert!(totals.tax >= Decimal::ZERO);
    }

    #[test]
    fn identical_inputs_give_identical_bits(q in arb_quantity(), p in arb_price(), t in arb_tax_percentage(), d in arb_discount()) {
        let a = calculate_line(q, p, t, d);
        let b = calculate_line(q, p, t, d);
        prop_assert_eq!(a.subtotal.serialize(), b.subtotal.serialize());
        prop_assert_eq!(a.taxable_base.serialize(), b.taxable_base.serialize());
        prop_assert_eq!(a.tax.serialize(), b.tax.serialize());
        prop_assert_eq!(a.total.serialize(), b.total.serialize());
    }

    #[test]
    fn larger_discount_never_raises_tax_or_total(
        q in arb_quantity(),
        p in arb_price(),
        t in arb_tax_percentage(),
        d in arb_discount(),
        step in arb_discount(),
    ) {
        let before = calculate_line(q, p, t, d);
        let after = calculate_line(q, p, t, d + step);
        prop_assert!(after.tax <= before.tax);
        prop_assert!(after.total <= before.total);
    }
}

// ── Header Aggregator ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn single_line_header_matches_line(line in arb_line()) {
        let header = calculate_header_totals(&[line], Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        prop_assert_eq!(header.subtotal, line.taxable_base);
        prop_assert_eq!(header.total_tax, line.tax);
        prop_assert_eq!(header.total_before_additional_discount, line.total);
        prop_assert_eq!(header.grand_total, line.total);
        prop_assert_eq!(header.amount_due, line.total);
    }

    #[test]
    fn grand_total_never_below_expense(
        lines in prop::collection::vec(arb_line(), 0..8),
        discount in arb_discount(),
        expense in arb_price(),
    ) {
        let header = calculate_header_totals(&lines, discount, expense, Decimal::ZERO, Decimal::ZERO);
        prop_assert!(header.grand_total >= expense);
        prop_assert_eq!(header.total_before_additional_discount, header.subtotal + header.total_tax);
    }

    #[test]
    fn amount_due_offsets_payments_and_returns(
        lines in prop::collection::vec(arb_line(), 1..5),
        paid in arb_price(),
        returned in arb_price(),
    ) {
        let header = calculate_header_totals(&lines, Decimal::ZERO, Decimal::ZERO, paid, returned);
        prop_assert_eq!(header.amount_due, header.grand_total - paid + returned);
    }
}

// ── Concrete Scenarios ──────────────────────────────────────────────────────

#[test]
fn purchase_form_scenario() {
    let totals = calculate_line(dec!(2), dec!(2500), dec!(11), dec!(2000));
    assert_eq!(totals.subtotal, dec!(5000));
    assert_eq!(totals.taxable_base, dec!(3000));
    assert_eq!(totals.tax, dec!(330));
    assert_eq!(totals.total, dec!(3330));
}

#[test]
fn empty_header_is_all_zero() {
    let header = calculate_header_totals(&[], Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
    assert_eq!(header.subtotal, Decimal::ZERO);
    assert_eq!(header.total_tax, Decimal::ZERO);
    assert_eq!(header.grand_total, Decimal::ZERO);
    assert_eq!(header.amount_due, Decimal::ZERO);
}

#[test]
fn two_lines_with_discount_and_expense() {
    let line = |total: Decimal| LineTotals {
        subtotal: total,
        taxable_base: total,
        tax: Decimal::ZERO,
        total,
    };
    let header = calculate_header_totals(
        &[line(dec!(100)), line(dec!(200))],
        dec!(50),
        dec!(10),
        Decimal::ZERO,
        Decimal::ZERO,
    );
    assert_eq!(header.grand_total, dec!(260));
}

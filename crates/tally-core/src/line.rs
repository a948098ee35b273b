//! # Line Calculator
//!
//! Computes the derived figures for one order line.
//!
//! ## Calculation Order (tax-on-net)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity × unit_price ────────────────────────────► subtotal          │
//! │                                                          │              │
//! │  max(subtotal - line_discount, 0) ◄──────────────────────┘              │
//! │        │                                                                │
//! │        └──────────────────────────────────────────────► taxable_base   │
//! │                                                          │              │
//! │  taxable_base × tax% / 100 ◄─────────────────────────────┘              │
//! │        │                                                                │
//! │        └──────────────────────────────────────────────► tax            │
//! │                                                                         │
//! │  taxable_base + tax ───────────────────────────────────► total         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount is subtracted BEFORE tax. Swapping the two steps changes
//! the financial result, so the order above is fixed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::{clamp_non_negative, round_to_precision};
use crate::types::{OrderLine, TaxRate};

/// Derived figures for a single line. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    /// `unit_price × quantity`.
    #[ts(type = "string")]
    pub subtotal: Decimal,
    /// Subtotal after line discount, clamped at zero.
    #[ts(type = "string")]
    pub taxable_base: Decimal,
    /// Tax on the taxable base.
    #[ts(type = "string")]
    pub tax: Decimal,
    /// `taxable_base + tax`.
    #[ts(type = "string")]
    pub total: Decimal,
}

impl LineTotals {
    /// Rounds every figure for display. Do not feed the result back into
    /// aggregation.
    pub fn rounded(&self, precision: u32) -> LineTotals {
        LineTotals {
            subtotal: round_to_precision(self.subtotal, precision),
            taxable_base: round_to_precision(self.taxable_base, precision),
            tax: round_to_precision(self.tax, precision),
            total: round_to_precision(self.total, precision),
        }
    }
}

/// Computes subtotal, taxable base, tax and total for one line.
///
/// Pure and unvalidated: callers are expected to run
/// [`crate::validation::validate_line`] first. Negative inputs are not
/// rejected here, though the taxable base still never drops below zero.
///
/// # Panics
/// `Decimal` arithmetic panics on overflow. Inputs within
/// [`crate::MAX_LINE_QUANTITY`] and [`crate::MAX_AMOUNT`] cannot overflow.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tally_core::line::calculate_line;
///
/// let totals = calculate_line(
///     Decimal::from(2),    // quantity
///     Decimal::from(2500), // unit price
///     Decimal::from(11),   // tax %
///     Decimal::from(2000), // line discount
/// );
/// assert_eq!(totals.subtotal, Decimal::from(5000));
/// assert_eq!(totals.taxable_base, Decimal::from(3000));
/// assert_eq!(totals.tax, Decimal::from(330));
/// assert_eq!(totals.total, Decimal::from(3330));
/// ```
pub fn calculate_line(
    quantity: Decimal,
    unit_price: Decimal,
    tax_percentage: Decimal,
    line_discount: Decimal,
) -> LineTotals {
    let subtotal = unit_price * quantity;
    let taxable_base = clamp_non_negative(subtotal - line_discount);
    let tax = TaxRate::from_percentage(tax_percentage).tax_on(taxable_base);

    LineTotals {
        subtotal,
        taxable_base,
        tax,
        total: taxable_base + tax,
    }
}

impl OrderLine {
    /// Runs [`calculate_line`] on this line's inputs.
    #[inline]
    pub fn totals(&self) -> LineTotals {
        calculate_line(
            self.quantity,
            self.unit_price,
            self.tax_percentage.percentage(),
            self.line_discount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discount_applied_before_tax() {
        let totals = calculate_line(dec!(2), dec!(2500), dec!(11), dec!(2000));
        assert_eq!(totals.subtotal, dec!(5000));
        assert_eq!(totals.taxable_base, dec!(3000));
        assert_eq!(totals.tax, dec!(330));
        assert_eq!(totals.total, dec!(3330));
    }

    #[test]
    fn test_discount_larger_than_subtotal_clamps_to_zero() {
        let totals = calculate_line(dec!(1), dec!(100), dec!(11), dec!(250));
        assert_eq!(totals.subtotal, dec!(100));
        assert_eq!(totals.taxable_base, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_zero_tax_rate() {
        let totals = calculate_line(dec!(3), dec!(19.99), Decimal::ZERO, dec!(5));
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, totals.taxable_base);
        assert_eq!(totals.total, dec!(54.97));
    }

    #[test]
    fn test_fractional_quantity() {
        // 1.25 kg at 8.40 per kg, 10% tax
        let totals = calculate_line(dec!(1.25), dec!(8.40), dec!(10), Decimal::ZERO);
        assert_eq!(totals.subtotal, dec!(10.5));
        assert_eq!(totals.tax, dec!(1.05));
        assert_eq!(totals.total, dec!(11.55));
    }

    #[test]
    fn test_no_internal_rounding() {
        // $10.00 at 8.25% = 0.825 stays unrounded
        let totals = calculate_line(dec!(1), dec!(10.00), dec!(8.25), Decimal::ZERO);
        assert_eq!(totals.tax, dec!(0.825));
        assert_eq!(totals.total, dec!(10.825));

        let shown = totals.rounded(2);
        assert_eq!(shown.tax, dec!(0.83));
        assert_eq!(shown.total, dec!(10.83));
    }

    #[test]
    fn test_negative_input_is_not_rejected() {
        // Validation is the caller's job; the clamp still holds.
        let totals = calculate_line(dec!(-2), dec!(10), dec!(10), Decimal::ZERO);
        assert_eq!(totals.subtotal, dec!(-20));
        assert_eq!(totals.taxable_base, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_order_line_totals_matches_function() {
        let line = OrderLine::new(dec!(2), dec!(2500), dec!(11)).with_discount(dec!(2000));
        assert_eq!(
            line.totals(),
            calculate_line(dec!(2), dec!(2500), dec!(11), dec!(2000))
        );
    }

    #[test]
    fn test_idempotent() {
        let a = calculate_line(dec!(7), dec!(3.33), dec!(12.5), dec!(1.11));
        let b = calculate_line(dec!(7), dec!(3.33), dec!(12.5), dec!(1.11));
        assert_eq!(a, b);
        assert_eq!(a.total.serialize(), b.total.serialize());
    }
}

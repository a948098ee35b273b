//! # Header Aggregator
//!
//! Combines line totals into the document-level figures shown at the bottom
//! of a purchase or sales form.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Σ taxable_base ──► subtotal                                           │
//! │  Σ tax          ──► total_tax                                          │
//! │  Σ total        ──► total_before_additional_discount                   │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  max(· - additional_discount, 0) + expense ──► grand_total             │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  grand_total - total_paid + total_return   ──► amount_due              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::{clamp_non_negative, round_to_precision};
use crate::line::LineTotals;
use crate::types::OrderLine;

/// Document-level adjustments applied on top of the line totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderAdjustments {
    /// Absolute discount applied once to the combined line totals.
    pub additional_discount: Decimal,
    /// Extra charge added after the discount (shipping, handling).
    pub expense: Decimal,
    /// Cumulative amount paid so far.
    pub total_paid: Decimal,
    /// Cumulative amount returned/refunded so far.
    pub total_return: Decimal,
}

/// Document-level totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTotals {
    /// Sum of post-discount, pre-tax line bases.
    #[ts(type = "string")]
    pub subtotal: Decimal,
    /// Sum of line taxes.
    #[ts(type = "string")]
    pub total_tax: Decimal,
    /// Sum of line totals (`subtotal + total_tax`).
    #[ts(type = "string")]
    pub total_before_additional_discount: Decimal,
    /// Payable amount after the additional discount and expense.
    #[ts(type = "string")]
    pub grand_total: Decimal,
    /// Grand total net of payments and returns.
    #[ts(type = "string")]
    pub amount_due: Decimal,
}

impl HeaderTotals {
    /// Rounds every figure for display or persistence.
    pub fn rounded(&self, precision: u32) -> HeaderTotals {
        HeaderTotals {
            subtotal: round_to_precision(self.subtotal, precision),
            total_tax: round_to_precision(self.total_tax, precision),
            total_before_additional_discount: round_to_precision(
                self.total_before_additional_discount,
                precision,
            ),
            grand_total: round_to_precision(self.grand_total, precision),
            amount_due: round_to_precision(self.amount_due, precision),
        }
    }

    /// True once payments (net of returns) cover the grand total.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.amount_due <= Decimal::ZERO
    }
}

/// Aggregates pre-computed line totals into document totals.
///
/// An empty `lines` slice yields zero line sums; the header adjustments
/// still apply.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tally_core::header::calculate_header_totals;
/// use tally_core::line::LineTotals;
///
/// let lines = [
///     LineTotals { total: Decimal::from(100), taxable_base: Decimal::from(100), ..Default::default() },
///     LineTotals { total: Decimal::from(200), taxable_base: Decimal::from(200), ..Default::default() },
/// ];
/// let totals = calculate_header_totals(
///     &lines,
///     Decimal::from(50), // additional discount
///     Decimal::from(10), // expense
///     Decimal::ZERO,
///     Decimal::ZERO,
/// );
/// assert_eq!(totals.grand_total, Decimal::from(260));
/// ```
pub fn calculate_header_totals(
    lines: &[LineTotals],
    additional_discount: Decimal,
    expense: Decimal,
    total_paid: Decimal,
    total_return: Decimal,
) -> HeaderTotals {
    let mut subtotal = Decimal::ZERO;
    let mut total_tax = Decimal::ZERO;
    let mut total_before_additional_discount = Decimal::ZERO;

    for line in lines {
        subtotal += line.taxable_base;
        total_tax += line.tax;
        total_before_additional_discount += line.total;
    }

    let grand_total =
        clamp_non_negative(total_before_additional_discount - additional_discount) + expense;

    HeaderTotals {
        subtotal,
        total_tax,
        total_before_additional_discount,
        grand_total,
        amount_due: amount_due_from(grand_total, total_paid, total_return),
    }
}

/// Runs the line calculator over `lines`, then aggregates.
pub fn calculate_document_totals(lines: &[OrderLine], adjustments: &HeaderAdjustments) -> HeaderTotals {
    let line_totals: Vec<LineTotals> = lines.iter().map(OrderLine::totals).collect();
    calculate_header_totals(
        &line_totals,
        adjustments.additional_discount,
        adjustments.expense,
        adjustments.total_paid,
        adjustments.total_return,
    )
}

/// `grand_total - total_paid + total_return`.
///
/// A return refunds money that was already counted in `total_paid`, so it
/// puts that amount back on the balance.
#[inline]
pub fn amount_due_from(grand_total: Decimal, total_paid: Decimal, total_return: Decimal) -> Decimal {
    grand_total - total_paid + total_return
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::calculate_line;
    use rust_decimal_macros::dec;

    fn line_with_total(total: Decimal) -> LineTotals {
        LineTotals {
            subtotal: total,
            taxable_base: total,
            tax: Decimal::ZERO,
            total,
        }
    }

    #[test]
    fn test_empty_lines_yield_zero() {
        let totals = calculate_header_totals(
            &[],
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(totals, HeaderTotals::default());
    }

    #[test]
    fn test_additional_discount_then_expense() {
        let lines = [line_with_total(dec!(100)), line_with_total(dec!(200))];
        let totals =
            calculate_header_totals(&lines, dec!(50), dec!(10), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.total_before_additional_discount, dec!(300));
        assert_eq!(totals.grand_total, dec!(260));
        assert_eq!(totals.amount_due, dec!(260));
    }

    #[test]
    fn test_additional_discount_clamps_before_expense() {
        let lines = [line_with_total(dec!(40))];
        let totals =
            calculate_header_totals(&lines, dec!(100), dec!(15), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.grand_total, dec!(15));
    }

    #[test]
    fn test_sums_tax_and_bases_separately() {
        let lines = [
            calculate_line(dec!(2), dec!(2500), dec!(11), dec!(2000)),
            calculate_line(dec!(1), dec!(1000), dec!(10), Decimal::ZERO),
        ];
        let totals = calculate_header_totals(
            &lines,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(totals.subtotal, dec!(4000));
        assert_eq!(totals.total_tax, dec!(430));
        assert_eq!(totals.total_before_additional_discount, dec!(4430));
        assert_eq!(
            totals.total_before_additional_discount,
            totals.subtotal + totals.total_tax
        );
    }

    #[test]
    fn test_payments_and_returns_offset_amount_due() {
        let lines = [line_with_total(dec!(500))];
        let totals = calculate_header_totals(&lines, Decimal::ZERO, Decimal::ZERO, dec!(300), dec!(50));
        assert_eq!(totals.grand_total, dec!(500));
        assert_eq!(totals.amount_due, dec!(250));
        assert!(!totals.is_settled());

        let paid = calculate_header_totals(&lines, Decimal::ZERO, Decimal::ZERO, dec!(500), Decimal::ZERO);
        assert!(paid.is_settled());
    }

    #[test]
    fn test_single_line_matches_line_totals() {
        let line = calculate_line(dec!(3), dec!(12.34), dec!(7.5), dec!(1.5));
        let totals = calculate_header_totals(
            &[line],
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(totals.subtotal, line.taxable_base);
        assert_eq!(totals.total_tax, line.tax);
        assert_eq!(totals.grand_total, line.total);
    }

    #[test]
    fn test_calculate_document_totals() {
        let lines = vec![
            OrderLine::new(dec!(2), dec!(2500), dec!(11)).with_discount(dec!(2000)),
            OrderLine::new(dec!(1), dec!(100), Decimal::ZERO),
        ];
        let adjustments = HeaderAdjustments {
            additional_discount: dec!(30),
            expense: dec!(20),
            total_paid: dec!(1000),
            total_return: Decimal::ZERO,
        };
        let totals = calculate_document_totals(&lines, &adjustments);
        assert_eq!(totals.grand_total, dec!(3420));
        assert_eq!(totals.amount_due, dec!(2420));
    }

    #[test]
    fn test_rounded_only_at_boundary() {
        let lines = [
            calculate_line(dec!(1), dec!(3.35), dec!(10), Decimal::ZERO),
            calculate_line(dec!(1), dec!(3.35), dec!(10), Decimal::ZERO),
            calculate_line(dec!(1), dec!(3.35), dec!(10), Decimal::ZERO),
        ];
        let totals = calculate_header_totals(
            &lines,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(totals.total_tax, dec!(1.005));
        assert_eq!(totals.rounded(2).total_tax, dec!(1.01));
    }
}

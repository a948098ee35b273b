//! Rendering of evaluated documents.
//!
//! Everything printed here is rounded with
//! [`tally_core::amount::round_to_precision`]; the figures passed in stay at
//! full precision.

use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::amount::round_to_precision;
use tally_core::{HeaderTotals, LineTotals, OrderDocument};

use crate::config::TallyConfig;

/// JSON output shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport<'a> {
    pub document: &'a OrderDocument,
    pub line_totals: Vec<LineTotals>,
    pub totals: HeaderTotals,
}

impl<'a> EvaluationReport<'a> {
    /// Computes per-line and header totals, rounded to `precision`.
    pub fn new(document: &'a OrderDocument, precision: u32) -> Self {
        EvaluationReport {
            document,
            line_totals: document
                .lines
                .iter()
                .map(|line| line.totals().rounded(precision))
                .collect(),
            totals: document.totals().rounded(precision),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Formats `amount` with the configured symbol and a fixed number of places.
pub fn format_money(amount: Decimal, config: &TallyConfig) -> String {
    let mut rounded = round_to_precision(amount, config.precision);
    rounded.rescale(config.precision);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{}", config.currency_symbol, rounded.abs())
    } else {
        format!("{}{}", config.currency_symbol, rounded.abs())
    }
}

/// Renders the document as a plain-text table.
pub fn render_table(document: &OrderDocument, config: &TallyConfig) -> String {
    let mut rows = vec![
        format!(
            "{} {} [{}] ({})",
            document.kind, document.reference, document.status, config.currency_code
        ),
        format!(
            "{:<4} {:<24} {:>10} {:>14} {:>12} {:>7} {:>14} {:>12} {:>14}",
            "#", "Item", "Qty", "Unit price", "Discount", "Tax %", "Base", "Tax", "Total"
        ),
    ];

    for (index, line) in document.lines.iter().enumerate() {
        let totals = line.totals();
        let label = line
            .description
            .as_deref()
            .or(line.product_id.as_deref())
            .unwrap_or("-");

        rows.push(format!(
            "{:<4} {:<24} {:>10} {:>14} {:>12} {:>7} {:>14} {:>12} {:>14}",
            index + 1,
            truncate(label, 24),
            line.quantity.normalize(),
            format_money(line.unit_price, config),
            format_money(line.line_discount, config),
            line.tax_percentage.percentage().normalize(),
            format_money(totals.taxable_base, config),
            format_money(totals.tax, config),
            format_money(totals.total, config),
        ));
    }

    let totals = document.totals();
    let summary = [
        ("Subtotal", totals.subtotal),
        ("Tax", totals.total_tax),
        ("Before discount", totals.total_before_additional_discount),
        ("Additional discount", document.additional_discount),
        ("Expense", document.expense),
        ("Grand total", totals.grand_total),
        ("Paid", document.total_paid),
        ("Returned", document.total_return),
        ("Amount due", totals.amount_due),
    ];

    rows.push(String::new());
    rows.extend(
        summary
            .into_iter()
            .map(|(label, amount)| format!("{:>24} {:>16}", label, format_money(amount, config))),
    );

    rows.join("\n")
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(max - 1).collect();
        cut.push('…');
        cut
    }
}

//! # Amount Module
//!
//! Decimal helpers shared by the calculators: zero clamping and the one
//! place rounding happens.
//!
//! There is no float entry point. `Decimal` has no NaN or infinity, and both
//! serde and `FromStr` reject `"NaN"`, so a non-finite value never reaches
//! the arithmetic.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents fix that but cannot hold 1.25 kg × 3.999 / unit.        │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, unrounded until the boundary            │
//! │    0.1 + 0.2 = 0.3 exactly                                              │
//! │    round_to_precision() runs once, at display or finalize               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Point
//! Rounding each step (line subtotal, line tax, sum) compounds cent-level
//! error across a document. Every calculator in this crate therefore works at
//! full precision and callers round exactly once:
//! - [`crate::line::LineTotals::rounded`] / [`crate::header::HeaderTotals::rounded`] for display
//! - [`crate::order::OrderDocument::finalize`] when totals are locked

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used when no currency precision is configured.
pub const DEFAULT_PRECISION: u32 = 2;

/// Returns `value`, or zero when it is negative.
#[inline]
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Rounds to `precision` decimal places, midpoint away from zero.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tally_core::amount::round_to_precision;
///
/// let tax = Decimal::new(825, 3); // 0.825
/// assert_eq!(round_to_precision(tax, 2), Decimal::new(83, 2));
/// ```
#[inline]
pub fn round_to_precision(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

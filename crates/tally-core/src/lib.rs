//! # tally-core: Pure Order Arithmetic for Tally
//!
//! This crate holds the line-item financial totals used by purchase and sales
//! documents, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Dashboard forms / REST backend / tally-cli             │   │
//! │  │     Purchase form ──► Sale form ──► Payments ──► Returns        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain numeric fields                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   line    │  │  header   │  │   order   │  │ validation│  │   │
//! │  │   │ Subtotal  │  │ GrandTotal│  │  Draft →  │  │   rules   │  │   │
//! │  │   │ Tax,Total │  │ AmountDue │  │  Finalize │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`line`] - Line calculator (subtotal, taxable base, tax, total)
//! - [`header`] - Header aggregator (grand total, amount due)
//! - [`order`] - Purchase/sales document lifecycle
//! - [`amount`] - Zero clamping and the single rounding point
//! - [`types`] - Domain types (OrderLine, TaxRate, statuses)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **Tax on Net**: line discount is subtracted before tax
//! 3. **Decimal Money**: no floats inside the arithmetic
//! 4. **Round Once**: only at display or when a document is finalized
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::{calculate_header_totals, calculate_line};
//!
//! let line = calculate_line(
//!     Decimal::from(2),
//!     Decimal::from(2500),
//!     Decimal::from(11),
//!     Decimal::from(2000),
//! );
//! assert_eq!(line.total, Decimal::from(3330));
//!
//! let header = calculate_header_totals(
//!     &[line],
//!     Decimal::from(330), // additional discount
//!     Decimal::ZERO,      // expense
//!     Decimal::from(1000),
//!     Decimal::ZERO,
//! );
//! assert_eq!(header.grand_total, Decimal::from(3000));
//! assert_eq!(header.amount_due, Decimal::from(2000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod error;
pub mod header;
pub mod line;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use header::{calculate_document_totals, calculate_header_totals, HeaderAdjustments, HeaderTotals};
pub use line::{calculate_line, LineTotals};
pub use order::OrderDocument;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines on a single document.
pub const MAX_DOCUMENT_LINES: usize = 500;

/// Maximum quantity on a single line.
///
/// ## Business Reason
/// Catches keying slips (an extra few zeros) before they reach a total.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// Largest accepted monetary input: unit price, discounts, expense, and
/// each payment or return as well as their running totals.
///
/// ## Headroom
/// ```text
/// MAX_DOCUMENT_LINES × MAX_LINE_QUANTITY × MAX_AMOUNT × 2 (100% tax)
///   = 500 × 10^6 × 10^15 × 2 = 10^24  <  Decimal::MAX ≈ 7.9 × 10^28
/// ```
/// so no validated document can overflow the calculators.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

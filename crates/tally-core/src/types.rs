//! # Domain Types
//!
//! Core domain types shared by the calculators and the order document.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderLine     │   │  DocumentKind   │   │ DocumentStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Purchase       │   │  Draft          │       │
//! │  │  quantity       │   │  Sale           │   │  Active         │       │
//! │  │  unit_price     │   └─────────────────┘   │  Completed      │       │
//! │  │  line_discount  │                         └─────────────────┘       │
//! │  │  tax_percentage │   ┌─────────────────┐                             │
//! │  └─────────────────┘   │    TaxRate      │                             │
//! │                        │  11 = 11%       │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate expressed as a percentage (`11` = 11%).
///
/// Percentages are what the purchase and sale forms capture, so the rate is
/// kept in that unit and only divided by 100 when tax is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percentage(pct: Decimal) -> Self {
        TaxRate(pct)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percentage(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Tax owed on `base` at this rate, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::types::TaxRate;
    ///
    /// let rate = TaxRate::from_percentage(Decimal::from(11));
    /// assert_eq!(rate.tax_on(Decimal::from(3000)), Decimal::from(330));
    /// ```
    #[inline]
    pub fn tax_on(&self, base: Decimal) -> Decimal {
        base * self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Document Kind
// =============================================================================

/// Which side of the ledger a document sits on.
///
/// The arithmetic is identical for both; the kind only labels the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Purchase order raised against a vendor.
    Purchase,
    /// Sales order raised for a customer.
    Sale,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Purchase => f.write_str("purchase"),
            DocumentKind::Sale => f.write_str("sale"),
        }
    }
}

// =============================================================================
// Document Status
// =============================================================================

/// The status of a purchase or sales document.
///
/// ```text
///   Draft ──finalize──► Active ◄──payments/returns──► Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Lines are still being edited; totals are live.
    Draft,
    /// Finalized with a balance outstanding.
    Active,
    /// Finalized and fully settled.
    Completed,
}

impl DocumentStatus {
    /// Whether lines and header adjustments may still change.
    #[inline]
    pub const fn is_draft(&self) -> bool {
        matches!(self, DocumentStatus::Draft)
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Draft
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Draft => f.write_str("draft"),
            DocumentStatus::Active => f.write_str("active"),
            DocumentStatus::Completed => f.write_str("completed"),
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One item on a purchase or sales document.
///
/// Only the four numeric inputs take part in the arithmetic; the remaining
/// fields are carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Unique identifier (UUID v4).
    #[serde(default = "new_line_id")]
    pub id: String,

    /// Product the line refers to, if any.
    #[serde(default)]
    pub product_id: Option<String>,

    /// Free-text label shown on the document.
    #[serde(default)]
    pub description: Option<String>,

    /// Quantity, integer or fractional depending on unit.
    #[ts(type = "string")]
    pub quantity: Decimal,

    /// Unit price before tax and before line discount.
    #[ts(type = "string")]
    pub unit_price: Decimal,

    /// Absolute discount for this line. May exceed the subtotal.
    #[serde(default)]
    #[ts(type = "string")]
    pub line_discount: Decimal,

    /// Tax rate as a percentage.
    #[serde(default)]
    #[ts(type = "string")]
    pub tax_percentage: TaxRate,
}

impl OrderLine {
    /// Creates a line with a fresh id and no discount.
    pub fn new(quantity: Decimal, unit_price: Decimal, tax_percentage: Decimal) -> Self {
        OrderLine {
            id: new_line_id(),
            product_id: None,
            description: None,
            quantity,
            unit_price,
            line_discount: Decimal::ZERO,
            tax_percentage: TaxRate::from_percentage(tax_percentage),
        }
    }

    /// Sets the absolute line discount.
    pub fn with_discount(mut self, line_discount: Decimal) -> Self {
        self.line_discount = line_discount;
        self
    }

    /// Sets the display label.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the product reference.
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }
}

fn new_line_id() -> String {
    Uuid::new_v4().to_string()
}

//! # Validation Module
//!
//! Input validation that runs before the calculators.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form (TypeScript)                                   │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  └── Malformed numbers never become a Decimal                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  └── Sign and range rules for every calculator input                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  calculate_line / calculate_header_totals (no checks of their own)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::validation::{validate_quantity, validate_tax_percentage};
//!
//! validate_quantity(Decimal::from(5)).unwrap();
//! assert!(validate_tax_percentage(Decimal::from(101)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::OrderLine;
use crate::{MAX_AMOUNT, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted document reference.
const MAX_REFERENCE_LEN: usize = 50;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must not be negative (zero is a placeholder row on the form)
/// - Must not exceed `MAX_LINE_QUANTITY`
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    ensure_non_negative("quantity", quantity)?;

    if quantity > Decimal::from(MAX_LINE_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "0".to_string(),
            max: MAX_LINE_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items, samples).
pub fn validate_unit_price(unit_price: Decimal) -> ValidationResult<()> {
    validate_amount("unit_price", unit_price)
}

/// Validates a tax percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
pub fn validate_tax_percentage(pct: Decimal) -> ValidationResult<()> {
    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "tax_percentage".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

/// Validates an absolute discount (line or additional).
///
/// A discount larger than what it applies to is accepted; the calculators
/// clamp it.
pub fn validate_discount(field: &str, discount: Decimal) -> ValidationResult<()> {
    validate_amount(field, discount)
}

/// Validates a monetary amount (price, expense, total paid, total return).
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed `MAX_AMOUNT`
pub fn validate_amount(field: &str, amount: Decimal) -> ValidationResult<()> {
    ensure_non_negative(field, amount)?;

    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: MAX_AMOUNT.to_string(),
        });
    }

    Ok(())
}

/// Validates a single payment or return entry.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_AMOUNT`
pub fn validate_payment_amount(amount: Decimal) -> ValidationResult<()> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    validate_amount("payment amount", amount)
}

/// Validates all four calculator inputs of a line.
///
/// ## User Workflow
/// ```text
/// Purchase form row edited
///      │
///      ▼
/// validate_line() ← THIS FUNCTION
///      │
///      ├── bad input → ValidationError shown under the field
///      │
///      └── OK → calculate_line() → row total refreshed
/// ```
pub fn validate_line(line: &OrderLine) -> ValidationResult<()> {
    validate_quantity(line.quantity)?;
    validate_unit_price(line.unit_price)?;
    validate_tax_percentage(line.tax_percentage.percentage())?;
    validate_discount("line_discount", line.line_discount)?;
    Ok(())
}

fn ensure_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a document reference such as `PO-2024/0012`.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, numbers, `-`, `_` and `/` only
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_reference;
///
/// assert!(validate_reference("PO-2024/0012").is_ok());
/// assert!(validate_reference("").is_err());
/// assert!(validate_reference("has space").is_err());
/// ```
pub fn validate_reference(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "reference".to_string(),
        });
    }

    if reference.len() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    if !reference
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/')
    {
        return Err(ValidationError::InvalidFormat {
            field: "reference".to_string(),
            reason: "must contain only letters, numbers, hyphens, underscores and slashes"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

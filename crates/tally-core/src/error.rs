//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Document lifecycle violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-cli errors (app)                                                │
//! │  └── ConfigError      - Bad configuration values                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculators in [`crate::line`] and [`crate::header`] never return
//! errors. Everything here is raised by the validation layer or by the
//! order document lifecycle around them.

use thiserror::Error;

use crate::types::DocumentStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Order document errors.
///
/// These represent business rule violations on a purchase or sales document.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line id does not exist on the document.
    #[error("Line not found: {0}")]
    LineNotFound(String),

    /// The document is no longer a draft and cannot be edited.
    ///
    /// ## When This Occurs
    /// - Adding, editing or removing a line after finalize
    /// - Changing the additional discount or expense after finalize
    /// - Finalizing twice
    #[error("Document {reference} is {status}, only drafts can be modified")]
    NotDraft {
        reference: String,
        status: DocumentStatus,
    },

    /// Finalize was called on a document with no lines.
    #[error("Document {0} has no lines")]
    EmptyDocument(String),

    /// Document has reached the maximum number of lines.
    #[error("Document cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Document JSON could not be parsed or produced.
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements and are raised
/// before any arithmetic runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, bad reference characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

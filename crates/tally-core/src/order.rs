//! # Order Document
//!
//! A purchase or sales document and its lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  OrderDocument::new() → Document { status: Draft }                     │
//! │     ├── add_line / update_line / remove_line                           │
//! │     ├── set_additional_discount / set_expense                          │
//! │     └── totals() recomputed on every call                              │
//! │                                                                         │
//! │  finalize(precision) → Document { status: Active | Completed }         │
//! │     ├── totals rounded ONCE and locked                                 │
//! │     └── lines and header adjustments frozen                            │
//! │                                                                         │
//! │  record_payment / record_return (any status)                           │
//! │     └── amount_due = locked grand_total - paid + returned              │
//! │         Active ◄──────────────► Completed                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::header::{amount_due_from, calculate_document_totals, HeaderAdjustments, HeaderTotals};
use crate::types::{DocumentKind, DocumentStatus, OrderLine};
use crate::validation::{
    validate_amount, validate_discount, validate_line, validate_payment_amount,
    validate_reference, validate_uuid,
};
use crate::MAX_DOCUMENT_LINES;

/// A purchase or sales document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    /// Unique identifier (UUID v4).
    #[serde(default = "new_document_id")]
    pub id: String,

    /// Purchase or sale.
    pub kind: DocumentKind,

    /// Human-readable document number (e.g. `PO-2024/0012`).
    pub reference: String,

    /// Current lifecycle status.
    #[serde(default)]
    pub status: DocumentStatus,

    /// Lines in insertion order.
    #[serde(default)]
    pub lines: Vec<OrderLine>,

    /// Document-level discount.
    #[serde(default)]
    #[ts(type = "string")]
    pub additional_discount: Decimal,

    /// Document-level charge (shipping, handling).
    #[serde(default)]
    #[ts(type = "string")]
    pub expense: Decimal,

    /// Cumulative payments.
    #[serde(default)]
    #[ts(type = "string")]
    pub total_paid: Decimal,

    /// Cumulative returns/refunds.
    #[serde(default)]
    #[ts(type = "string")]
    pub total_return: Decimal,

    /// Totals frozen at finalize. `None` while draft.
    #[serde(default)]
    pub locked_totals: Option<HeaderTotals>,

    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl OrderDocument {
    /// Creates an empty draft document.
    pub fn new(kind: DocumentKind, reference: &str) -> CoreResult<Self> {
        validate_reference(reference)?;

        Ok(OrderDocument {
            id: new_document_id(),
            kind,
            reference: reference.trim().to_string(),
            status: DocumentStatus::Draft,
            lines: Vec::new(),
            additional_discount: Decimal::ZERO,
            expense: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_return: Decimal::ZERO,
            locked_totals: None,
            created_at: Utc::now(),
            finalized_at: None,
        })
    }

    /// Parses a document from JSON and validates it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let document: OrderDocument = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Serializes the document as pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Runs every validator over the document's inputs.
    pub fn validate(&self) -> CoreResult<()> {
        validate_uuid("id", &self.id)?;
        validate_reference(&self.reference)?;

        if !self.status.is_draft() && self.locked_totals.is_none() {
            return Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("{} document has no locked totals", self.status),
            }
            .into());
        }

        if self.lines.len() > MAX_DOCUMENT_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_DOCUMENT_LINES,
            });
        }

        for line in &self.lines {
            validate_uuid("line id", &line.id)?;
            validate_line(line)?;
        }

        validate_discount("additional_discount", self.additional_discount)?;
        validate_amount("expense", self.expense)?;
        validate_amount("total_paid", self.total_paid)?;
        validate_amount("total_return", self.total_return)?;
        Ok(())
    }

    /// Header adjustments as currently recorded.
    pub fn adjustments(&self) -> HeaderAdjustments {
        HeaderAdjustments {
            additional_discount: self.additional_discount,
            expense: self.expense,
            total_paid: self.total_paid,
            total_return: self.total_return,
        }
    }

    /// Current totals.
    ///
    /// Drafts are recomputed from their lines. Finalized documents keep their
    /// locked figures; only the amount due moves with payments and returns.
    pub fn totals(&self) -> HeaderTotals {
        match self.locked_totals {
            Some(locked) => HeaderTotals {
                amount_due: amount_due_from(locked.grand_total, self.total_paid, self.total_return),
                ..locked
            },
            None => calculate_document_totals(&self.lines, &self.adjustments()),
        }
    }

    // -------------------------------------------------------------------------
    // Draft editing
    // -------------------------------------------------------------------------

    /// Appends a line and returns its id.
    pub fn add_line(&mut self, line: OrderLine) -> CoreResult<String> {
        self.ensure_draft()?;
        validate_line(&line)?;

        if self.lines.len() >= MAX_DOCUMENT_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_DOCUMENT_LINES,
            });
        }

        debug!(reference = %self.reference, line_id = %line.id, "Adding line");
        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Replaces the inputs of an existing line. The line keeps its id and
    /// position.
    pub fn update_line(&mut self, line_id: &str, mut line: OrderLine) -> CoreResult<()> {
        self.ensure_draft()?;
        validate_line(&line)?;

        let slot = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        debug!(reference = %self.reference, line_id, "Updating line");
        line.id = slot.id.clone();
        *slot = line;
        Ok(())
    }

    /// Removes a line and returns it.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<OrderLine> {
        self.ensure_draft()?;

        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        debug!(reference = %self.reference, line_id, "Removing line");
        Ok(self.lines.remove(index))
    }

    pub fn set_additional_discount(&mut self, amount: Decimal) -> CoreResult<()> {
        self.ensure_draft()?;
        validate_discount("additional_discount", amount)?;
        self.additional_discount = amount;
        Ok(())
    }

    pub fn set_expense(&mut self, amount: Decimal) -> CoreResult<()> {
        self.ensure_draft()?;
        validate_amount("expense", amount)?;
        self.expense = amount;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Finalize & settlement
    // -------------------------------------------------------------------------

    /// Locks the document.
    ///
    /// Totals are rounded to `precision` decimal places exactly once here and
    /// become the authoritative record. Status is `Completed` if payments
    /// already cover the grand total, `Active` otherwise.
    pub fn finalize(&mut self, precision: u32) -> CoreResult<HeaderTotals> {
        self.ensure_draft()?;

        if self.lines.is_empty() {
            return Err(CoreError::EmptyDocument(self.reference.clone()));
        }

        let locked = calculate_document_totals(&self.lines, &self.adjustments()).rounded(precision);
        self.locked_totals = Some(locked);
        self.finalized_at = Some(Utc::now());
        self.refresh_status();

        info!(
            reference = %self.reference,
            kind = %self.kind,
            status = %self.status,
            grand_total = %locked.grand_total,
            "Document finalized"
        );
        Ok(self.totals())
    }

    /// Records a payment against the document.
    pub fn record_payment(&mut self, amount: Decimal) -> CoreResult<HeaderTotals> {
        validate_payment_amount(amount)?;
        let total_paid = self.total_paid + amount;
        validate_amount("total_paid", total_paid)?;
        debug!(reference = %self.reference, %amount, "Recording payment");

        self.total_paid = total_paid;
        self.refresh_status();
        Ok(self.totals())
    }

    /// Records a return/refund against the document.
    pub fn record_return(&mut self, amount: Decimal) -> CoreResult<HeaderTotals> {
        validate_payment_amount(amount)?;
        let total_return = self.total_return + amount;
        validate_amount("total_return", total_return)?;
        debug!(reference = %self.reference, %amount, "Recording return");

        self.total_return = total_return;
        self.refresh_status();
        Ok(self.totals())
    }

    fn ensure_draft(&self) -> CoreResult<()> {
        if self.status.is_draft() {
            Ok(())
        } else {
            Err(CoreError::NotDraft {
                reference: self.reference.clone(),
                status: self.status,
            })
        }
    }

    // Drafts stay drafts; only finalized documents move between Active and Completed.
    fn refresh_status(&mut self) {
        if self.locked_totals.is_none() {
            return;
        }

        self.status = if self.totals().is_settled() {
            DocumentStatus::Completed
        } else {
            DocumentStatus::Active
        };
    }
}

fn new_document_id() -> String {
    Uuid::new_v4().to_string()
}

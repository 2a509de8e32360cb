//! Invoice model for pricing-engine.

use crate::models::LineItem;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment status of an invoice. Derived on read from the invoice total and
/// the sum of recorded payments, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Partial,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Paid => "paid",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "partial" => InvoiceStatus::Partial,
            "paid" => InvoiceStatus::Paid,
            _ => InvoiceStatus::Pending,
        }
    }
}

/// Invoice document.
///
/// `party_name` is a snapshot taken when the invoice is created or edited; it
/// is never re-derived from the live party, so deleting or renaming the party
/// leaves history intact (`party_id` goes `None` on party deletion).
/// `bundle_charge` is derived from `bundle_rate * bundle_quantity` but stored
/// independently so a manual override survives until the next automatic
/// recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: Uuid,
    pub party_id: Option<Uuid>,
    pub party_name: String,
    pub invoice_date: NaiveDate,
    pub bundle_rate: Decimal,
    pub bundle_quantity: Decimal,
    pub bundle_charge: Decimal,
    pub line_items: Vec<LineItem>,
    pub total_amount: Decimal,
    /// Amount-only quick entry: no line items, manually entered total.
    pub is_offline: bool,
    pub created_utc: DateTime<Utc>,
}

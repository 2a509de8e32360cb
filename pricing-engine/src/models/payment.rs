//! Payment model for pricing-engine.

use crate::models::InvoiceStatus;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment recorded against an invoice. Payments never outlive their parent
/// invoice (the store cascade-deletes them with it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: Uuid,
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Read-time payment classification for an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub total: Decimal,
    pub received: Decimal,
    /// Amount still owed, clamped at zero for display.
    pub pending: Decimal,
    pub status: InvoiceStatus,
}

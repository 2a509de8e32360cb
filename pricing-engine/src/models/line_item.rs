//! Invoice line item model for pricing-engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Line item on an invoice.
///
/// `item_id` and `unit_id` are cleared when the referenced catalog records
/// are deleted; `item_name`, `unit_name`, and `rate` stay behind as a frozen
/// snapshot so historical invoices keep rendering. Lines order by
/// `(position, line_item_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub line_item_id: Uuid,
    pub item_id: Option<Uuid>,
    pub item_name: String,
    pub quantity: Decimal,
    /// Price per `unit_name`, resolved through party overrides at add time.
    pub rate: Decimal,
    pub unit_id: Option<Uuid>,
    pub unit_name: String,
    /// Derived `quantity * rate`; recomputed on every edit, never trusted
    /// from storage when re-validating.
    pub amount: Decimal,
    pub position: i32,
}

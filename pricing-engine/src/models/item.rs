//! Item model for pricing-engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog item. `default_rate` is the selling price per `unit_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub item_id: Uuid,
    pub name: String,
    pub default_rate: Decimal,
    pub purchase_rate: Option<Decimal>,
    pub unit_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating an item.
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    pub default_rate: Decimal,
    pub purchase_rate: Option<Decimal>,
    pub unit_id: Uuid,
}

/// Input for updating an item.
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub default_rate: Option<Decimal>,
    pub purchase_rate: Option<Decimal>,
    pub unit_id: Option<Uuid>,
}

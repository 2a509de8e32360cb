//! Party (customer/supplier) model for pricing-engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer or supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub party_id: Uuid,
    pub name: String,
    /// Per-bundle surcharge default for this party; the global setting applies
    /// when absent or non-positive.
    pub bundle_rate: Option<Decimal>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a party.
#[derive(Debug, Clone)]
pub struct CreateParty {
    pub name: String,
    pub bundle_rate: Option<Decimal>,
}

/// Input for updating a party.
#[derive(Debug, Clone, Default)]
pub struct UpdateParty {
    pub name: Option<String>,
    pub bundle_rate: Option<Decimal>,
}

/// Party-specific price for an item; takes precedence over the item's
/// default rate. At most one override exists per `(party_id, item_id)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyPriceOverride {
    pub party_id: Uuid,
    pub item_id: Uuid,
    pub price: Decimal,
}

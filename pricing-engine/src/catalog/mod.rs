//! Collaborator seams for the pricing engine.
//!
//! The engine never reaches for a process-wide client; callers hand it these
//! lookups explicitly. [`MemoryCatalog`] is the in-memory reference
//! implementation used by the editing session tests; a real deployment backs
//! these traits with its persistence layer.

mod memory;

pub use memory::MemoryCatalog;

use crate::models::{Item, PartyPriceOverride};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Party-specific price lookup.
pub trait PriceOverrides {
    /// Price registered for `(party_id, item_id)`, when one exists.
    fn price_for(&self, party_id: Uuid, item_id: Uuid) -> Option<Decimal>;
}

impl PriceOverrides for [PartyPriceOverride] {
    fn price_for(&self, party_id: Uuid, item_id: Uuid) -> Option<Decimal> {
        self.iter()
            .find(|o| o.party_id == party_id && o.item_id == item_id)
            .map(|o| o.price)
    }
}

impl PriceOverrides for Vec<PartyPriceOverride> {
    fn price_for(&self, party_id: Uuid, item_id: Uuid) -> Option<Decimal> {
        self.as_slice().price_for(party_id, item_id)
    }
}

/// Item lookup restricted to live (not soft-deleted) records.
pub trait ItemCatalog {
    fn active_item(&self, item_id: Uuid) -> Option<Item>;
}

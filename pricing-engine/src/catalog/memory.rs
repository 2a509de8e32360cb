//! In-memory catalog implementation.

use crate::catalog::{ItemCatalog, PriceOverrides};
use crate::models::{
    CreateItem, CreateParty, CreateUnit, Item, Party, PartyPriceOverride, Unit, UnitConversions,
    UpdateItem, UpdateParty,
};
use billing_core::error::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

/// In-memory store of units, items, parties, and party price overrides.
///
/// Deletes are soft: records keep their row with `deleted_at` set, stay
/// reachable by id for historical invoices, and drop out of the active
/// listings. Overrides are keyed by `(party_id, item_id)`, so the
/// one-override-per-pair invariant holds by construction.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    units: HashMap<Uuid, Unit>,
    items: HashMap<Uuid, Item>,
    parties: HashMap<Uuid, Party>,
    overrides: HashMap<(Uuid, Uuid), Decimal>,
    conversions: UnitConversions,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Unit Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_unit(&mut self, input: CreateUnit) -> Unit {
        let unit = Unit {
            unit_id: Uuid::new_v4(),
            name: input.name,
            abbreviation: input.abbreviation,
            deleted_at: None,
            created_utc: Utc::now(),
        };
        self.units.insert(unit.unit_id, unit.clone());
        info!(unit_id = %unit.unit_id, "Unit created");
        unit
    }

    pub fn get_unit(&self, unit_id: Uuid) -> Option<&Unit> {
        self.units.get(&unit_id)
    }

    pub fn active_unit(&self, unit_id: Uuid) -> Option<&Unit> {
        self.units
            .get(&unit_id)
            .filter(|u| u.deleted_at.is_none())
    }

    /// Active units, sorted by name.
    pub fn list_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self
            .units
            .values()
            .filter(|u| u.deleted_at.is_none())
            .collect();
        units.sort_by(|a, b| a.name.cmp(&b.name));
        units
    }

    #[instrument(skip(self))]
    pub fn soft_delete_unit(&mut self, unit_id: Uuid) -> Result<(), AppError> {
        let unit = self
            .units
            .get_mut(&unit_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Unit not found")))?;
        unit.deleted_at = Some(Utc::now());
        info!(unit_id = %unit_id, "Unit soft-deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn restore_unit(&mut self, unit_id: Uuid) -> Result<(), AppError> {
        let unit = self
            .units
            .get_mut(&unit_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Unit not found")))?;
        unit.deleted_at = None;
        info!(unit_id = %unit_id, "Unit restored");
        Ok(())
    }

    /// Register `1 from_unit = factor to_units`.
    #[instrument(skip(self))]
    pub fn register_conversion(
        &mut self,
        from_unit: Uuid,
        to_unit: Uuid,
        factor: Decimal,
    ) -> Result<(), AppError> {
        if factor <= Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Conversion factor must be positive, got {}",
                factor
            )));
        }
        if !self.units.contains_key(&from_unit) || !self.units.contains_key(&to_unit) {
            return Err(AppError::NotFound(anyhow::anyhow!("Unit not found")));
        }
        self.conversions.register(from_unit, to_unit, factor);
        Ok(())
    }

    pub fn conversions(&self) -> &UnitConversions {
        &self.conversions
    }

    // -------------------------------------------------------------------------
    // Item Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_item(&mut self, input: CreateItem) -> Result<Item, AppError> {
        if input.default_rate < Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Item default rate must be non-negative, got {}",
                input.default_rate
            )));
        }
        if matches!(input.purchase_rate, Some(rate) if rate < Decimal::ZERO) {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Item purchase rate must be non-negative"
            )));
        }
        if self.active_unit(input.unit_id).is_none() {
            return Err(AppError::NotFound(anyhow::anyhow!("Unit not found")));
        }

        let item = Item {
            item_id: Uuid::new_v4(),
            name: input.name,
            default_rate: input.default_rate,
            purchase_rate: input.purchase_rate,
            unit_id: input.unit_id,
            deleted_at: None,
            created_utc: Utc::now(),
        };
        self.items.insert(item.item_id, item.clone());
        info!(item_id = %item.item_id, "Item created");
        Ok(item)
    }

    #[instrument(skip(self, input))]
    pub fn update_item(&mut self, item_id: Uuid, input: UpdateItem) -> Result<Item, AppError> {
        if matches!(input.default_rate, Some(rate) if rate < Decimal::ZERO) {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Item default rate must be non-negative"
            )));
        }
        if let Some(unit_id) = input.unit_id {
            if self.active_unit(unit_id).is_none() {
                return Err(AppError::NotFound(anyhow::anyhow!("Unit not found")));
            }
        }

        let item = self
            .items
            .get_mut(&item_id)
            .filter(|i| i.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))?;

        if let Some(name) = input.name {
            item.name = name;
        }
        if let Some(rate) = input.default_rate {
            item.default_rate = rate;
        }
        if let Some(rate) = input.purchase_rate {
            item.purchase_rate = Some(rate);
        }
        if let Some(unit_id) = input.unit_id {
            item.unit_id = unit_id;
        }

        info!(item_id = %item_id, "Item updated");
        Ok(item.clone())
    }

    /// Item by id, including soft-deleted rows (historical lookups).
    pub fn get_item(&self, item_id: Uuid) -> Option<&Item> {
        self.items.get(&item_id)
    }

    /// Active items, sorted by name.
    pub fn list_items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self
            .items
            .values()
            .filter(|i| i.deleted_at.is_none())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    #[instrument(skip(self))]
    pub fn soft_delete_item(&mut self, item_id: Uuid) -> Result<(), AppError> {
        let item = self
            .items
            .get_mut(&item_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))?;
        item.deleted_at = Some(Utc::now());
        info!(item_id = %item_id, "Item soft-deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn restore_item(&mut self, item_id: Uuid) -> Result<(), AppError> {
        let item = self
            .items
            .get_mut(&item_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))?;
        item.deleted_at = None;
        info!(item_id = %item_id, "Item restored");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Party Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_party(&mut self, input: CreateParty) -> Result<Party, AppError> {
        if matches!(input.bundle_rate, Some(rate) if rate < Decimal::ZERO) {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Party bundle rate must be non-negative"
            )));
        }

        let party = Party {
            party_id: Uuid::new_v4(),
            name: input.name,
            bundle_rate: input.bundle_rate,
            deleted_at: None,
            created_utc: Utc::now(),
        };
        self.parties.insert(party.party_id, party.clone());
        info!(party_id = %party.party_id, "Party created");
        Ok(party)
    }

    #[instrument(skip(self, input))]
    pub fn update_party(&mut self, party_id: Uuid, input: UpdateParty) -> Result<Party, AppError> {
        if matches!(input.bundle_rate, Some(rate) if rate < Decimal::ZERO) {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Party bundle rate must be non-negative"
            )));
        }

        let party = self
            .parties
            .get_mut(&party_id)
            .filter(|p| p.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Party not found")))?;

        if let Some(name) = input.name {
            party.name = name;
        }
        if let Some(rate) = input.bundle_rate {
            party.bundle_rate = Some(rate);
        }

        info!(party_id = %party_id, "Party updated");
        Ok(party.clone())
    }

    /// Party by id, including soft-deleted rows (historical lookups).
    pub fn get_party(&self, party_id: Uuid) -> Option<&Party> {
        self.parties.get(&party_id)
    }

    pub fn active_party(&self, party_id: Uuid) -> Option<&Party> {
        self.parties
            .get(&party_id)
            .filter(|p| p.deleted_at.is_none())
    }

    /// Active parties, sorted by name.
    pub fn list_parties(&self) -> Vec<&Party> {
        let mut parties: Vec<&Party> = self
            .parties
            .values()
            .filter(|p| p.deleted_at.is_none())
            .collect();
        parties.sort_by(|a, b| a.name.cmp(&b.name));
        parties
    }

    #[instrument(skip(self))]
    pub fn soft_delete_party(&mut self, party_id: Uuid) -> Result<(), AppError> {
        let party = self
            .parties
            .get_mut(&party_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Party not found")))?;
        party.deleted_at = Some(Utc::now());
        info!(party_id = %party_id, "Party soft-deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn restore_party(&mut self, party_id: Uuid) -> Result<(), AppError> {
        let party = self
            .parties
            .get_mut(&party_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Party not found")))?;
        party.deleted_at = None;
        info!(party_id = %party_id, "Party restored");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Price Override Operations
    // -------------------------------------------------------------------------

    /// Set the party-specific price for an item. Upserts, so each
    /// `(party, item)` pair holds at most one override.
    #[instrument(skip(self))]
    pub fn set_price_override(
        &mut self,
        party_id: Uuid,
        item_id: Uuid,
        price: Decimal,
    ) -> Result<PartyPriceOverride, AppError> {
        if price < Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Override price must be non-negative, got {}",
                price
            )));
        }
        if self.active_party(party_id).is_none() {
            return Err(AppError::NotFound(anyhow::anyhow!("Party not found")));
        }
        if self
            .items
            .get(&item_id)
            .filter(|i| i.deleted_at.is_none())
            .is_none()
        {
            return Err(AppError::NotFound(anyhow::anyhow!("Item not found")));
        }

        self.overrides.insert((party_id, item_id), price);
        info!(party_id = %party_id, item_id = %item_id, price = %price, "Price override set");
        Ok(PartyPriceOverride {
            party_id,
            item_id,
            price,
        })
    }

    #[instrument(skip(self))]
    pub fn remove_price_override(&mut self, party_id: Uuid, item_id: Uuid) -> bool {
        let removed = self.overrides.remove(&(party_id, item_id)).is_some();
        if removed {
            info!(party_id = %party_id, item_id = %item_id, "Price override removed");
        }
        removed
    }

    /// Overrides registered for a party, sorted by item id for determinism.
    pub fn list_price_overrides(&self, party_id: Uuid) -> Vec<PartyPriceOverride> {
        let mut overrides: Vec<PartyPriceOverride> = self
            .overrides
            .iter()
            .filter(|((p, _), _)| *p == party_id)
            .map(|((p, i), price)| PartyPriceOverride {
                party_id: *p,
                item_id: *i,
                price: *price,
            })
            .collect();
        overrides.sort_by_key(|o| o.item_id);
        overrides
    }
}

impl PriceOverrides for MemoryCatalog {
    fn price_for(&self, party_id: Uuid, item_id: Uuid) -> Option<Decimal> {
        self.overrides.get(&(party_id, item_id)).copied()
    }
}

impl ItemCatalog for MemoryCatalog {
    fn active_item(&self, item_id: Uuid) -> Option<Item> {
        self.items
            .get(&item_id)
            .filter(|i| i.deleted_at.is_none())
            .cloned()
    }
}

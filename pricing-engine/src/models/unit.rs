//! Measurement unit model for pricing-engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A unit of measure for items (piece, dozen, kilogram, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: Uuid,
    pub name: String,
    pub abbreviation: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a unit.
#[derive(Debug, Clone)]
pub struct CreateUnit {
    pub name: String,
    pub abbreviation: Option<String>,
}

/// Conversion factors between units.
///
/// A registered factor `k` for `(from, to)` means `1 from-unit = k to-units`.
/// Lookups consult the reciprocal registration when only the opposite
/// direction is known.
#[derive(Debug, Clone, Default)]
pub struct UnitConversions {
    factors: HashMap<(Uuid, Uuid), Decimal>,
}

impl UnitConversions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, from_unit: Uuid, to_unit: Uuid, factor: Decimal) {
        self.factors.insert((from_unit, to_unit), factor);
    }

    /// Factor such that `1 from_unit = factor to_units`, if known.
    pub fn factor(&self, from_unit: Uuid, to_unit: Uuid) -> Option<Decimal> {
        if from_unit == to_unit {
            return Some(Decimal::ONE);
        }
        if let Some(k) = self.factors.get(&(from_unit, to_unit)) {
            return Some(*k);
        }
        self.factors.get(&(to_unit, from_unit)).and_then(|k| {
            if k.is_zero() {
                None
            } else {
                Some(Decimal::ONE / *k)
            }
        })
    }
}

//! Rate resolution for invoice lines.

use crate::catalog::PriceOverrides;
use crate::models::{Item, UnitConversions};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Effective selling rate for an item on a given party's invoice.
///
/// A party-specific override wins over the item's default rate; with no party
/// or no override the default applies. The resolved value is snapshotted into
/// the line by the caller, so later catalog changes never rewrite saved lines.
pub fn resolve_item_rate<O>(item: &Item, party_id: Option<Uuid>, overrides: &O) -> Decimal
where
    O: PriceOverrides + ?Sized,
{
    if let Some(party_id) = party_id {
        if let Some(price) = overrides.price_for(party_id, item.item_id) {
            return price;
        }
    }
    item.default_rate
}

/// Convert a per-unit rate between display units.
///
/// With `1 from_unit = k to_units`, a rate captured per `from_unit` becomes
/// `rate / k` per `to_unit` (the inverse of quantity conversion: finer units
/// cost less apiece). An unknown pair returns the rate unchanged rather than
/// failing the edit. No rounding happens here; display formatting rounds.
pub fn convert_rate(
    rate: Decimal,
    from_unit: Uuid,
    to_unit: Uuid,
    conversions: &UnitConversions,
) -> Decimal {
    match conversions.factor(from_unit, to_unit) {
        Some(k) if !k.is_zero() => rate / k,
        _ => rate,
    }
}

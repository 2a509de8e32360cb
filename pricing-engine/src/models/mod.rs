//! Domain models for pricing-engine.

mod invoice;
mod item;
mod line_item;
mod party;
mod payment;
mod unit;

pub use invoice::{Invoice, InvoiceStatus};
pub use item::{CreateItem, Item, UpdateItem};
pub use line_item::LineItem;
pub use party::{CreateParty, Party, PartyPriceOverride, UpdateParty};
pub use payment::{Payment, PaymentSummary};
pub use unit::{CreateUnit, Unit, UnitConversions};

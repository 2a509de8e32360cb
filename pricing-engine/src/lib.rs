//! pricing-engine: invoice pricing, totals, and payment status for PlasticMart.
//!
//! The pure computation lives in [`pricing`]; [`draft`] reproduces the
//! recompute-on-every-edit behavior of the invoice form; [`catalog`] holds the
//! collaborator seams (price overrides, unit conversions, item/party/unit
//! catalogs) plus an in-memory reference implementation.
pub mod catalog;
pub mod currency;
pub mod draft;
pub mod models;
pub mod pricing;

pub use catalog::{ItemCatalog, MemoryCatalog, PriceOverrides};
pub use currency::{format_currency, CurrencyStyle, DigitGrouping};
pub use draft::InvoiceDraft;
pub use pricing::{
    balance, compute_bundle_charge, compute_grand_total, compute_line_amount, compute_sub_total,
    convert_rate, derive_invoice_status, pending_amount, resolve_item_rate, summarize_payments,
    verify_invoice_totals,
};

//! Pure invoice pricing computation.
//!
//! Everything here is stateless and deterministic: no I/O, no shared state,
//! safe to recompute on every read from any number of callers.

mod rates;
mod status;
mod totals;

pub use rates::{convert_rate, resolve_item_rate};
pub use status::{balance, derive_invoice_status, pending_amount, summarize_payments};
pub use totals::{
    compute_bundle_charge, compute_grand_total, compute_line_amount, compute_sub_total,
    verify_invoice_totals,
};

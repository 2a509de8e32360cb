//! Payment status derivation.

use crate::models::{InvoiceStatus, Payment, PaymentSummary};
use rust_decimal::Decimal;

/// Classify an invoice from its total and the amount received so far.
///
/// A zero-total invoice with nothing received reads as `Pending`, not `Paid`:
/// no money has moved. Overpayment still reads as `Paid`.
pub fn derive_invoice_status(total: Decimal, received: Decimal) -> InvoiceStatus {
    if received <= Decimal::ZERO {
        InvoiceStatus::Pending
    } else if received < total {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Paid
    }
}

/// Raw signed difference `total - received`; negative on overpayment.
pub fn balance(total: Decimal, received: Decimal) -> Decimal {
    total - received
}

/// Amount still owed, clamped at zero for display.
pub fn pending_amount(total: Decimal, received: Decimal) -> Decimal {
    balance(total, received).max(Decimal::ZERO)
}

/// Fold a payment list into the read-time classification.
pub fn summarize_payments(total: Decimal, payments: &[Payment]) -> PaymentSummary {
    let received = payments
        .iter()
        .fold(Decimal::ZERO, |acc, payment| acc + payment.amount);
    PaymentSummary {
        total,
        received,
        pending: pending_amount(total, received),
        status: derive_invoice_status(total, received),
    }
}

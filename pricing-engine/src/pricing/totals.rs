//! Line and invoice total computation.

use crate::models::{Invoice, LineItem};
use billing_core::error::AppError;
use rust_decimal::Decimal;

/// `quantity * rate`, exactly. Negative inputs are a validation failure;
/// zero quantity is left to the caller's form validation.
pub fn compute_line_amount(quantity: Decimal, rate: Decimal) -> Result<Decimal, AppError> {
    if quantity < Decimal::ZERO || rate < Decimal::ZERO {
        return Err(AppError::ValidationError(anyhow::anyhow!(
            "Quantity and rate must be non-negative, got quantity {} and rate {}",
            quantity,
            rate
        )));
    }
    Ok(quantity * rate)
}

/// Sum of line amounts, recomputed from each line's `(quantity, rate)`.
/// An empty line list sums to zero.
pub fn compute_sub_total(lines: &[LineItem]) -> Result<Decimal, AppError> {
    let mut sub_total = Decimal::ZERO;
    for line in lines {
        sub_total += compute_line_amount(line.quantity, line.rate)?;
    }
    Ok(sub_total)
}

/// `bundle_quantity * bundle_rate`. Negative inputs are a validation failure.
pub fn compute_bundle_charge(
    bundle_quantity: Decimal,
    bundle_rate: Decimal,
) -> Result<Decimal, AppError> {
    if bundle_quantity < Decimal::ZERO || bundle_rate < Decimal::ZERO {
        return Err(AppError::ValidationError(anyhow::anyhow!(
            "Bundle quantity and rate must be non-negative, got quantity {} and rate {}",
            bundle_quantity,
            bundle_rate
        )));
    }
    Ok(bundle_quantity * bundle_rate)
}

pub fn compute_grand_total(sub_total: Decimal, bundle_charge: Decimal) -> Decimal {
    sub_total + bundle_charge
}

/// Re-validate a stored invoice's derived fields.
///
/// Line amounts and the grand total are recomputed from quantities and rates;
/// a mismatch means the stored row was tampered with or saved by a buggy
/// writer. Offline invoices carry only a manual total and skip the line
/// checks.
pub fn verify_invoice_totals(invoice: &Invoice) -> Result<(), AppError> {
    if invoice.is_offline {
        if invoice.total_amount < Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Offline invoice {} has negative total {}",
                invoice.invoice_id,
                invoice.total_amount
            )));
        }
        return Ok(());
    }

    for line in &invoice.line_items {
        let amount = compute_line_amount(line.quantity, line.rate)?;
        if amount != line.amount {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Line {} stores amount {} but quantity * rate is {}",
                line.line_item_id,
                line.amount,
                amount
            )));
        }
    }

    let sub_total = compute_sub_total(&invoice.line_items)?;
    let total = compute_grand_total(sub_total, invoice.bundle_charge);
    if total != invoice.total_amount {
        return Err(AppError::ValidationError(anyhow::anyhow!(
            "Invoice {} stores total {} but lines + bundle charge give {}",
            invoice.invoice_id,
            invoice.total_amount,
            total
        )));
    }

    Ok(())
}

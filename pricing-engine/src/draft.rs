//! Invoice editing session.
//!
//! The web and mobile invoice forms recompute derived totals on every field
//! change. [`InvoiceDraft`] reproduces that behavior as explicit
//! recompute-on-mutation: every setter leaves `bundle_charge`, the subtotal,
//! and `total_amount` consistent with the current inputs, so a caller can
//! render after any edit without a separate recompute step.

use crate::catalog::{ItemCatalog, PriceOverrides};
use crate::models::{Invoice, Item, LineItem, Party, Unit, UnitConversions};
use crate::pricing::{
    compute_bundle_charge, compute_grand_total, compute_line_amount, compute_sub_total,
    convert_rate, resolve_item_rate,
};
use billing_core::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

/// A mutable invoice being created or edited.
pub struct InvoiceDraft {
    invoice_id: Option<Uuid>,
    party_id: Option<Uuid>,
    party_name: String,
    bundle_rate: Decimal,
    bundle_quantity: Decimal,
    bundle_charge: Decimal,
    lines: Vec<LineItem>,
    sub_total: Decimal,
    total_amount: Decimal,
    is_offline: bool,
    next_position: i32,
    created_utc: Option<DateTime<Utc>>,
}

impl InvoiceDraft {
    /// Start a new invoice. The party's name is snapshotted here; its bundle
    /// rate seeds the draft when positive, otherwise the configured global
    /// default applies.
    pub fn new(party: Option<&Party>, default_bundle_rate: Decimal) -> Self {
        let bundle_rate = party
            .and_then(|p| p.bundle_rate)
            .filter(|rate| *rate > Decimal::ZERO)
            .unwrap_or(default_bundle_rate);

        Self {
            invoice_id: None,
            party_id: party.map(|p| p.party_id),
            party_name: party.map(|p| p.name.clone()).unwrap_or_default(),
            bundle_rate,
            bundle_quantity: Decimal::ZERO,
            bundle_charge: Decimal::ZERO,
            lines: Vec::new(),
            sub_total: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            is_offline: false,
            next_position: 0,
            created_utc: None,
        }
    }

    /// Start an amount-only quick entry: no line items, manual total.
    pub fn offline(party: Option<&Party>, total_amount: Decimal) -> Result<Self, AppError> {
        if total_amount < Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Offline invoice total must be non-negative, got {}",
                total_amount
            )));
        }
        let mut draft = Self::new(party, Decimal::ZERO);
        draft.bundle_rate = Decimal::ZERO;
        draft.is_offline = true;
        draft.total_amount = total_amount;
        Ok(draft)
    }

    /// Resume editing a saved invoice, keeping its identity and timestamps.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let next_position = invoice
            .line_items
            .iter()
            .map(|l| l.position)
            .max()
            .map_or(0, |p| p + 1);
        let mut draft = Self {
            invoice_id: Some(invoice.invoice_id),
            party_id: invoice.party_id,
            party_name: invoice.party_name.clone(),
            bundle_rate: invoice.bundle_rate,
            bundle_quantity: invoice.bundle_quantity,
            bundle_charge: invoice.bundle_charge,
            lines: invoice.line_items.clone(),
            sub_total: Decimal::ZERO,
            total_amount: invoice.total_amount,
            is_offline: invoice.is_offline,
            next_position,
            created_utc: Some(invoice.created_utc),
        };
        draft.sort_lines();
        draft.recompute_totals();
        draft
    }

    // -------------------------------------------------------------------------
    // Line Item Operations
    // -------------------------------------------------------------------------

    /// Add a line for a catalog item. The rate resolves through the current
    /// party's overrides and converts to the chosen display unit; both are
    /// snapshotted into the line.
    pub fn add_line<O>(
        &mut self,
        item: &Item,
        quantity: Decimal,
        unit: &Unit,
        overrides: &O,
        conversions: &UnitConversions,
    ) -> Result<Uuid, AppError>
    where
        O: PriceOverrides + ?Sized,
    {
        if self.is_offline {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Offline invoices carry no line items"
            )));
        }
        if quantity <= Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Quantity must be positive, got {}",
                quantity
            )));
        }

        let mut rate = resolve_item_rate(item, self.party_id, overrides);
        if unit.unit_id != item.unit_id {
            rate = convert_rate(rate, item.unit_id, unit.unit_id, conversions);
        }
        let amount = compute_line_amount(quantity, rate)?;

        let line = LineItem {
            line_item_id: Uuid::new_v4(),
            item_id: Some(item.item_id),
            item_name: item.name.clone(),
            quantity,
            rate,
            unit_id: Some(unit.unit_id),
            unit_name: unit.name.clone(),
            amount,
            position: self.next_position,
        };
        self.next_position += 1;
        let line_item_id = line.line_item_id;
        self.lines.push(line);
        self.sort_lines();
        self.recompute_totals();
        Ok(line_item_id)
    }

    /// Change a line's quantity and/or rate; its amount and the invoice
    /// totals recompute immediately.
    pub fn update_line(
        &mut self,
        line_item_id: Uuid,
        quantity: Option<Decimal>,
        rate: Option<Decimal>,
    ) -> Result<(), AppError> {
        if matches!(quantity, Some(q) if q <= Decimal::ZERO) {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Quantity must be positive"
            )));
        }
        if matches!(rate, Some(r) if r < Decimal::ZERO) {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Rate must be non-negative"
            )));
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_item_id == line_item_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Line item not found")))?;

        if let Some(quantity) = quantity {
            line.quantity = quantity;
        }
        if let Some(rate) = rate {
            line.rate = rate;
        }
        line.amount = compute_line_amount(line.quantity, line.rate)?;
        self.recompute_totals();
        Ok(())
    }

    pub fn remove_line(&mut self, line_item_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.line_item_id != line_item_id);
        let removed = self.lines.len() < before;
        if removed {
            self.recompute_totals();
        }
        removed
    }

    /// Reposition a line; ordering stays `(position, line_item_id)`.
    pub fn move_line(&mut self, line_item_id: Uuid, position: i32) -> Result<(), AppError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_item_id == line_item_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Line item not found")))?;
        line.position = position;
        self.next_position = self.next_position.max(position + 1);
        self.sort_lines();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Bundle Charge
    // -------------------------------------------------------------------------

    /// Changing the bundle rate recomputes the bundle charge, replacing any
    /// manual override.
    pub fn set_bundle_rate(&mut self, bundle_rate: Decimal) -> Result<(), AppError> {
        self.bundle_charge = compute_bundle_charge(self.bundle_quantity, bundle_rate)?;
        self.bundle_rate = bundle_rate;
        self.recompute_totals();
        Ok(())
    }

    /// Changing the bundle quantity recomputes the bundle charge, replacing
    /// any manual override.
    pub fn set_bundle_quantity(&mut self, bundle_quantity: Decimal) -> Result<(), AppError> {
        self.bundle_charge = compute_bundle_charge(bundle_quantity, self.bundle_rate)?;
        self.bundle_quantity = bundle_quantity;
        self.recompute_totals();
        Ok(())
    }

    /// Manually override the bundle charge. The override holds until the
    /// next rate or quantity change triggers an automatic recompute.
    pub fn set_bundle_charge(&mut self, bundle_charge: Decimal) -> Result<(), AppError> {
        if bundle_charge < Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Bundle charge must be non-negative, got {}",
                bundle_charge
            )));
        }
        self.bundle_charge = bundle_charge;
        self.recompute_totals();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Party and Snapshot Maintenance
    // -------------------------------------------------------------------------

    /// Switch the invoice to another party (or none). The name snapshot is
    /// retaken and rates re-resolve for lines that still reference a live
    /// catalog item; frozen lines keep their captured rate.
    pub fn set_party<C, O>(
        &mut self,
        party: Option<&Party>,
        items: &C,
        overrides: &O,
        conversions: &UnitConversions,
    ) -> Result<(), AppError>
    where
        C: ItemCatalog,
        O: PriceOverrides + ?Sized,
    {
        self.party_id = party.map(|p| p.party_id);
        self.party_name = party.map(|p| p.name.clone()).unwrap_or_default();

        let party_id = self.party_id;
        for line in &mut self.lines {
            let Some(item_id) = line.item_id else {
                continue;
            };
            let Some(item) = items.active_item(item_id) else {
                continue;
            };
            let mut rate = resolve_item_rate(&item, party_id, overrides);
            if let Some(unit_id) = line.unit_id {
                if unit_id != item.unit_id {
                    rate = convert_rate(rate, item.unit_id, unit_id, conversions);
                }
            }
            line.rate = rate;
            line.amount = compute_line_amount(line.quantity, rate)?;
        }
        self.recompute_totals();
        Ok(())
    }

    /// Drop the live item reference from any line that carries it, keeping
    /// the name/rate snapshot. Called when the item is soft-deleted mid-edit.
    pub fn freeze_item(&mut self, item_id: Uuid) {
        for line in &mut self.lines {
            if line.item_id == Some(item_id) {
                line.item_id = None;
            }
        }
    }

    /// Drop the live party reference, keeping the name snapshot.
    pub fn freeze_party(&mut self) {
        self.party_id = None;
    }

    /// Set the manual total of an offline quick entry.
    pub fn set_total_amount(&mut self, total_amount: Decimal) -> Result<(), AppError> {
        if !self.is_offline {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Totals of itemized invoices are derived, not set"
            )));
        }
        if total_amount < Decimal::ZERO {
            return Err(AppError::ValidationError(anyhow::anyhow!(
                "Offline invoice total must be non-negative, got {}",
                total_amount
            )));
        }
        self.total_amount = total_amount;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn party_id(&self) -> Option<Uuid> {
        self.party_id
    }

    pub fn party_name(&self) -> &str {
        &self.party_name
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn bundle_rate(&self) -> Decimal {
        self.bundle_rate
    }

    pub fn bundle_quantity(&self) -> Decimal {
        self.bundle_quantity
    }

    pub fn bundle_charge(&self) -> Decimal {
        self.bundle_charge
    }

    pub fn sub_total(&self) -> Decimal {
        self.sub_total
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn is_offline(&self) -> bool {
        self.is_offline
    }

    // -------------------------------------------------------------------------
    // Finalization
    // -------------------------------------------------------------------------

    /// Validate the draft and produce the invoice document. A full invoice
    /// needs at least one line; an offline entry needs none. Line amounts and
    /// the grand total are recomputed here rather than trusted from the
    /// editing state.
    #[instrument(skip(self), fields(lines = self.lines.len(), offline = self.is_offline))]
    pub fn finalize(self, invoice_date: NaiveDate) -> Result<Invoice, AppError> {
        let (lines, total_amount) = if self.is_offline {
            if !self.lines.is_empty() {
                return Err(AppError::ValidationError(anyhow::anyhow!(
                    "Offline invoices carry no line items"
                )));
            }
            (Vec::new(), self.total_amount)
        } else {
            if self.lines.is_empty() {
                return Err(AppError::ValidationError(anyhow::anyhow!(
                    "At least one line item is required"
                )));
            }
            let mut lines = self.lines;
            for line in &mut lines {
                if line.quantity <= Decimal::ZERO {
                    return Err(AppError::ValidationError(anyhow::anyhow!(
                        "Line '{}' has non-positive quantity {}",
                        line.item_name,
                        line.quantity
                    )));
                }
                line.amount = compute_line_amount(line.quantity, line.rate)?;
            }
            let sub_total = compute_sub_total(&lines)?;
            (lines, compute_grand_total(sub_total, self.bundle_charge))
        };

        let invoice = Invoice {
            invoice_id: self.invoice_id.unwrap_or_else(Uuid::new_v4),
            party_id: self.party_id,
            party_name: self.party_name,
            invoice_date,
            bundle_rate: self.bundle_rate,
            bundle_quantity: self.bundle_quantity,
            bundle_charge: self.bundle_charge,
            line_items: lines,
            total_amount,
            is_offline: self.is_offline,
            created_utc: self.created_utc.unwrap_or_else(Utc::now),
        };

        info!(
            invoice_id = %invoice.invoice_id,
            total_amount = %invoice.total_amount,
            "Invoice finalized"
        );

        Ok(invoice)
    }

    fn sort_lines(&mut self) {
        self.lines
            .sort_by(|a, b| (a.position, a.line_item_id).cmp(&(b.position, b.line_item_id)));
    }

    /// Line amounts are maintained at each write, so the subtotal is their
    /// sum. Offline drafts keep their manual total.
    fn recompute_totals(&mut self) {
        self.sub_total = self
            .lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc + line.amount);
        if !self.is_offline {
            self.total_amount = compute_grand_total(self.sub_total, self.bundle_charge);
        }
    }
}

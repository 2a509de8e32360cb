//! Invoice editing session tests for pricing-engine.

mod common;

use billing_core::error::AppError;
use common::{dec, invoice_date, test_payment};
use pricing_engine::models::{
    CreateItem, CreateParty, CreateUnit, InvoiceStatus, Item, Party, Unit,
};
use pricing_engine::{summarize_payments, verify_invoice_totals, InvoiceDraft, MemoryCatalog};
use rust_decimal::Decimal;

struct Fixture {
    catalog: MemoryCatalog,
    piece: Unit,
    bucket: Item,
    mug: Item,
    party: Party,
}

fn setup() -> Fixture {
    let mut catalog = MemoryCatalog::new();
    let piece = catalog.create_unit(CreateUnit {
        name: "piece".to_string(),
        abbreviation: Some("pc".to_string()),
    });
    let bucket = catalog
        .create_item(CreateItem {
            name: "Plastic Bucket".to_string(),
            default_rate: dec("100"),
            purchase_rate: Some(dec("70")),
            unit_id: piece.unit_id,
        })
        .expect("Failed to create item");
    let mug = catalog
        .create_item(CreateItem {
            name: "Mug".to_string(),
            default_rate: dec("50"),
            purchase_rate: None,
            unit_id: piece.unit_id,
        })
        .expect("Failed to create item");
    let party = catalog
        .create_party(CreateParty {
            name: "Sharma Traders".to_string(),
            bundle_rate: None,
        })
        .expect("Failed to create party");
    Fixture {
        catalog,
        piece,
        bucket,
        mug,
        party,
    }
}

#[test]
fn end_to_end_invoice_scenario() {
    let f = setup();
    let mut draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);

    draft
        .add_line(&f.bucket, dec("3"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    draft
        .add_line(&f.mug, dec("2"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    draft.set_bundle_quantity(dec("1")).expect("Valid quantity");
    draft.set_bundle_rate(dec("20")).expect("Valid rate");

    assert_eq!(draft.sub_total(), dec("400"));
    assert_eq!(draft.bundle_charge(), dec("20"));
    assert_eq!(draft.total_amount(), dec("420"));

    let invoice = draft.finalize(invoice_date()).expect("Valid draft");
    assert_eq!(invoice.total_amount, dec("420"));
    assert_eq!(invoice.party_name, "Sharma Traders");
    verify_invoice_totals(&invoice).expect("Consistent invoice");

    let paid = summarize_payments(
        invoice.total_amount,
        &[test_payment(invoice.invoice_id, dec("420"))],
    );
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert_eq!(paid.pending, Decimal::ZERO);

    let partial = summarize_payments(
        invoice.total_amount,
        &[test_payment(invoice.invoice_id, dec("200"))],
    );
    assert_eq!(partial.status, InvoiceStatus::Partial);
    assert_eq!(partial.pending, dec("220"));

    let unpaid = summarize_payments(invoice.total_amount, &[]);
    assert_eq!(unpaid.status, InvoiceStatus::Pending);
    assert_eq!(unpaid.pending, dec("420"));
}

#[test]
fn totals_recompute_on_every_edit() {
    let f = setup();
    let mut draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);

    let line_id = draft
        .add_line(&f.bucket, dec("2"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    assert_eq!(draft.total_amount(), dec("200"));

    draft
        .update_line(line_id, Some(dec("5")), None)
        .expect("Failed to update line");
    assert_eq!(draft.total_amount(), dec("500"));

    draft
        .update_line(line_id, None, Some(dec("90")))
        .expect("Failed to update line");
    assert_eq!(draft.total_amount(), dec("450"));

    assert!(draft.remove_line(line_id));
    assert_eq!(draft.total_amount(), Decimal::ZERO);
    assert!(!draft.remove_line(line_id));
}

#[test]
fn manual_bundle_charge_holds_until_rate_or_quantity_changes() {
    let f = setup();
    let mut draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);
    draft
        .add_line(&f.bucket, dec("1"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");

    draft.set_bundle_quantity(dec("2")).expect("Valid quantity");
    draft.set_bundle_rate(dec("10")).expect("Valid rate");
    assert_eq!(draft.bundle_charge(), dec("20"));

    // manual override wins immediately
    draft.set_bundle_charge(dec("35")).expect("Valid charge");
    assert_eq!(draft.bundle_charge(), dec("35"));
    assert_eq!(draft.total_amount(), dec("135"));

    // the next automatic trigger replaces the override
    draft.set_bundle_quantity(dec("3")).expect("Valid quantity");
    assert_eq!(draft.bundle_charge(), dec("30"));
    assert_eq!(draft.total_amount(), dec("130"));
}

#[test]
fn party_switch_re_resolves_live_lines_and_keeps_frozen_snapshots() {
    let mut f = setup();
    let other_party = f
        .catalog
        .create_party(CreateParty {
            name: "Verma Stores".to_string(),
            bundle_rate: None,
        })
        .expect("Failed to create party");
    f.catalog
        .set_price_override(other_party.party_id, f.bucket.item_id, dec("80"))
        .expect("Failed to set override");

    let mut draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);
    draft
        .add_line(&f.bucket, dec("2"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    draft
        .add_line(&f.mug, dec("1"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    assert_eq!(draft.total_amount(), dec("250"));

    // the mug is deleted from the catalog mid-edit; its line freezes
    f.catalog
        .soft_delete_item(f.mug.item_id)
        .expect("Failed to delete item");
    draft.freeze_item(f.mug.item_id);

    draft
        .set_party(
            Some(&other_party),
            &f.catalog,
            &f.catalog,
            f.catalog.conversions(),
        )
        .expect("Failed to switch party");

    assert_eq!(draft.party_name(), "Verma Stores");
    // the bucket picks up the override; the frozen mug line keeps its rate
    assert_eq!(draft.lines()[0].rate, dec("80"));
    assert_eq!(draft.lines()[1].rate, dec("50"));
    assert!(draft.lines()[1].item_id.is_none());
    assert_eq!(draft.total_amount(), dec("210"));
}

#[test]
fn party_bundle_rate_seeds_the_draft() {
    let mut catalog = MemoryCatalog::new();
    let with_rate = catalog
        .create_party(CreateParty {
            name: "Gupta & Sons".to_string(),
            bundle_rate: Some(dec("35")),
        })
        .expect("Failed to create party");
    let without_rate = catalog
        .create_party(CreateParty {
            name: "Verma Stores".to_string(),
            bundle_rate: None,
        })
        .expect("Failed to create party");

    let draft = InvoiceDraft::new(Some(&with_rate), dec("12"));
    assert_eq!(draft.bundle_rate(), dec("35"));

    let draft = InvoiceDraft::new(Some(&without_rate), dec("12"));
    assert_eq!(draft.bundle_rate(), dec("12"));
}

#[test]
fn offline_invoices_have_a_manual_total_and_no_lines() {
    let f = setup();

    let mut draft = InvoiceDraft::offline(None, dec("750")).expect("Valid offline draft");
    assert!(matches!(
        draft.add_line(&f.bucket, dec("1"), &f.piece, &f.catalog, f.catalog.conversions()),
        Err(AppError::BadRequest(_))
    ));
    draft.set_total_amount(dec("800")).expect("Valid total");

    let invoice = draft.finalize(invoice_date()).expect("Valid offline draft");
    assert!(invoice.is_offline);
    assert!(invoice.line_items.is_empty());
    assert_eq!(invoice.total_amount, dec("800"));

    assert!(matches!(
        InvoiceDraft::offline(None, dec("-1")),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn a_full_invoice_requires_at_least_one_line() {
    let f = setup();
    let draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);
    assert!(matches!(
        draft.finalize(invoice_date()),
        Err(AppError::ValidationError(_))
    ));

    // itemized totals are derived, never set directly
    let mut draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);
    assert!(matches!(
        draft.set_total_amount(dec("100")),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn lines_order_by_position_with_id_breaking_ties() {
    let f = setup();
    let mut draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);

    let first = draft
        .add_line(&f.bucket, dec("1"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    let second = draft
        .add_line(&f.mug, dec("1"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    assert_eq!(draft.lines()[0].line_item_id, first);
    assert_eq!(draft.lines()[1].line_item_id, second);

    draft.move_line(first, 5).expect("Failed to move line");
    assert_eq!(draft.lines()[0].line_item_id, second);
    assert_eq!(draft.lines()[1].line_item_id, first);
}

#[test]
fn resumed_drafts_keep_invoice_identity() {
    let f = setup();
    let mut draft = InvoiceDraft::new(Some(&f.party), Decimal::ZERO);
    draft
        .add_line(&f.bucket, dec("1"), &f.piece, &f.catalog, f.catalog.conversions())
        .expect("Failed to add line");
    let invoice = draft.finalize(invoice_date()).expect("Valid draft");

    let mut resumed = InvoiceDraft::from_invoice(&invoice);
    let line_id = resumed.lines()[0].line_item_id;
    resumed
        .update_line(line_id, Some(dec("4")), None)
        .expect("Failed to update line");
    let edited = resumed.finalize(invoice_date()).expect("Valid draft");

    assert_eq!(edited.invoice_id, invoice.invoice_id);
    assert_eq!(edited.created_utc, invoice.created_utc);
    assert_eq!(edited.total_amount, dec("400"));
}

#[test]
fn display_unit_conversion_happens_at_add_time() {
    let mut catalog = MemoryCatalog::new();
    let dozen = catalog.create_unit(CreateUnit {
        name: "dozen".to_string(),
        abbreviation: Some("dz".to_string()),
    });
    let piece = catalog.create_unit(CreateUnit {
        name: "piece".to_string(),
        abbreviation: Some("pc".to_string()),
    });
    catalog
        .register_conversion(dozen.unit_id, piece.unit_id, dec("12"))
        .expect("Failed to register conversion");
    let item = catalog
        .create_item(CreateItem {
            name: "Spoon".to_string(),
            default_rate: dec("120"), // per dozen
            purchase_rate: None,
            unit_id: dozen.unit_id,
        })
        .expect("Failed to create item");

    let mut draft = InvoiceDraft::new(None, Decimal::ZERO);
    draft
        .add_line(&item, dec("24"), &piece, &catalog, catalog.conversions())
        .expect("Failed to add line");

    let line = &draft.lines()[0];
    assert_eq!(line.rate, dec("10"));
    assert_eq!(line.unit_name, "piece");
    assert_eq!(line.amount, dec("240"));
    assert_eq!(draft.total_amount(), dec("240"));
}

//! Test helper module for pricing-engine integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use pricing_engine::models::{Item, LineItem, Payment, Unit};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("Invalid decimal literal")
}

pub fn invoice_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).expect("Invalid date")
}

/// Standalone unit record, for tests that bypass the catalog.
pub fn test_unit(name: &str) -> Unit {
    Unit {
        unit_id: Uuid::new_v4(),
        name: name.to_string(),
        abbreviation: None,
        deleted_at: None,
        created_utc: Utc::now(),
    }
}

/// Standalone item record, for tests that bypass the catalog.
pub fn test_item(name: &str, default_rate: Decimal, unit_id: Uuid) -> Item {
    Item {
        item_id: Uuid::new_v4(),
        name: name.to_string(),
        default_rate,
        purchase_rate: None,
        unit_id,
        deleted_at: None,
        created_utc: Utc::now(),
    }
}

/// Line item with a consistent derived amount.
pub fn test_line(quantity: Decimal, rate: Decimal, position: i32) -> LineItem {
    LineItem {
        line_item_id: Uuid::new_v4(),
        item_id: None,
        item_name: format!("Item {}", position),
        quantity,
        rate,
        unit_id: None,
        unit_name: "piece".to_string(),
        amount: quantity * rate,
        position,
    }
}

pub fn test_payment(invoice_id: Uuid, amount: Decimal) -> Payment {
    Payment {
        payment_id: Uuid::new_v4(),
        invoice_id,
        amount,
        payment_date: invoice_date(),
        notes: None,
        created_utc: Utc::now(),
    }
}

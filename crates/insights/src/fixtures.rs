//! Snapshot builders for tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use shopledger_core::ItemId;
use shopledger_credit::{CreditRecord, GrantRequest, grant_credit};
use shopledger_inventory::InventoryItem;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 11, 0, 0).unwrap()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    now().date_naive() + Duration::days(days)
}

pub fn item(name: &str, quantity: u64, min_stock_level: u64) -> InventoryItem {
    InventoryItem {
        item_id: ItemId::new(),
        name: name.to_string(),
        category: "groceries".to_string(),
        quantity,
        unit: "pcs".to_string(),
        cost_price: Decimal::from(80),
        selling_price: Decimal::from(100),
        min_stock_level,
        expiry_date: None,
    }
}

pub fn expiring_item(name: &str, days: i64) -> InventoryItem {
    InventoryItem {
        expiry_date: Some(days_from_today(days)),
        ..item(name, 50, 10)
    }
}

pub fn priced_item(name: &str, quantity: u64, cost: i64, selling: i64) -> InventoryItem {
    InventoryItem {
        cost_price: Decimal::from(cost),
        selling_price: Decimal::from(selling),
        ..item(name, quantity, 10)
    }
}

/// Record with `amount` outstanding, due `due_in_days` from today.
pub fn credit(name: &str, amount: i64, due_in_days: i64) -> CreditRecord {
    grant_credit(
        None,
        &GrantRequest::new(name, Decimal::from(amount)).due_on(days_from_today(due_in_days)),
        now() - Duration::days(60),
        30,
    )
    .unwrap()
}

//! Single-pass snapshot scans shared by the classifier, the recommender and the
//! dashboard counters, so all three agree on what "low", "expired" and
//! "overdue" mean.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use shopledger_credit::CreditRecord;
use shopledger_inventory::{ExpiryState, InventoryItem, expiry_state};

/// Inventory items bucketed by the alert rules, each in snapshot order.
///
/// An item may sit in more than one bucket (e.g. low stock and expiring).
#[derive(Debug, Clone, Default)]
pub struct InventoryScan<'a> {
    pub expired: Vec<&'a InventoryItem>,
    pub expiring: Vec<&'a InventoryItem>,
    pub low_stock: Vec<&'a InventoryItem>,
}

impl<'a> InventoryScan<'a> {
    pub fn new(items: &'a [InventoryItem], today: NaiveDate, warning_days: u32) -> Self {
        let mut scan = Self::default();
        for item in items {
            match expiry_state(item, today, warning_days) {
                ExpiryState::Expired(_) => scan.expired.push(item),
                ExpiryState::ExpiringSoon(_) => scan.expiring.push(item),
                ExpiryState::Fresh(_) | ExpiryState::NoExpiry => {}
            }
            if item.is_low_stock() {
                scan.low_stock.push(item);
            }
        }
        scan
    }
}

/// Credit records split by derived status as of the scan day.
///
/// Totals saturate at `Decimal::MAX` instead of overflowing.
#[derive(Debug, Clone, Default)]
pub struct CreditScan<'a> {
    pub overdue: Vec<&'a CreditRecord>,
    pub total_outstanding: Decimal,
    pub overdue_outstanding: Decimal,
}

impl<'a> CreditScan<'a> {
    pub fn new(records: &'a [CreditRecord], today: NaiveDate) -> Self {
        let mut scan = Self::default();
        for record in records {
            scan.total_outstanding = scan.total_outstanding.saturating_add(record.outstanding_amount);
            if record.is_overdue_at(today) {
                scan.overdue_outstanding = scan.overdue_outstanding.saturating_add(record.outstanding_amount);
                scan.overdue.push(record);
            }
        }
        scan
    }
}

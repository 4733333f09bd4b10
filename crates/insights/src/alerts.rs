//! Alert classifier.
//!
//! Rules fire in a fixed order, which is also the display order:
//!
//! | # | kind               | priority | fires when                                   |
//! |---|--------------------|----------|----------------------------------------------|
//! | 1 | `Expired`          | HIGH     | any item's expiry date is before today       |
//! | 2 | `ExpiringSoon`     | HIGH     | any item expires within the warning window   |
//! | 3 | `LowStock`         | HIGH     | any item has quantity below its min level    |
//! | 4 | `OverdueCredit`    | MEDIUM   | any credit record is overdue                 |
//! | 5 | `OutstandingCredit`| MEDIUM   | total outstanding above threshold, no overdue|
//! | 6 | `AllClear`         | LOW      | nothing above fired                          |
//!
//! Rules 4 and 5 are mutually exclusive. Each rule yields at most one alert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::money::rupees;
use shopledger_credit::CreditRecord;
use shopledger_inventory::InventoryItem;

use crate::config::InsightConfig;
use crate::scan::{CreditScan, InventoryScan};

/// Alert urgency. Ordered: `High < Medium < Low` sorts most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Expired,
    ExpiringSoon,
    LowStock,
    OverdueCredit,
    OutstandingCredit,
    AllClear,
}

impl AlertKind {
    pub fn priority(self) -> AlertPriority {
        match self {
            AlertKind::Expired | AlertKind::ExpiringSoon | AlertKind::LowStock => AlertPriority::High,
            AlertKind::OverdueCredit | AlertKind::OutstandingCredit => AlertPriority::Medium,
            AlertKind::AllClear => AlertPriority::Low,
        }
    }
}

/// A derived warning. Produced fresh on every evaluation, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub priority: AlertPriority,
    pub title: String,
    pub message: String,
    /// Recommended next step; empty only for `AllClear`.
    pub action: String,
}

impl Alert {
    fn new(kind: AlertKind, title: &str, message: String, action: &str) -> Self {
        Self {
            kind,
            priority: kind.priority(),
            title: title.to_string(),
            message,
            action: action.to_string(),
        }
    }
}

/// Derive the prioritized alert feed from the current snapshots.
pub fn classify(
    inventory: &[InventoryItem],
    credit: &[CreditRecord],
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> Vec<Alert> {
    let today = now.date_naive();
    let stock = InventoryScan::new(inventory, today, config.expiry_warning_days);
    let tabs = CreditScan::new(credit, today);
    let limit = config.alert_name_limit;

    let mut alerts = Vec::new();

    if !stock.expired.is_empty() {
        alerts.push(Alert::new(
            AlertKind::Expired,
            "EXPIRED Items",
            format!(
                "{} items have expired: {}",
                stock.expired.len(),
                name_list(&stock.expired, limit)
            ),
            "Remove from shelves immediately to avoid health risks",
        ));
    }

    if !stock.expiring.is_empty() {
        alerts.push(Alert::new(
            AlertKind::ExpiringSoon,
            "Items Expiring Soon",
            format!(
                "{} items expiring within {} days: {}",
                stock.expiring.len(),
                config.expiry_warning_days,
                name_list(&stock.expiring, limit)
            ),
            "Offer discounts or combo deals to clear stock before expiry",
        ));
    }

    if !stock.low_stock.is_empty() {
        alerts.push(Alert::new(
            AlertKind::LowStock,
            "Low Stock Alert",
            format!(
                "{} items running low: {}",
                stock.low_stock.len(),
                name_list(&stock.low_stock, limit)
            ),
            "Restock immediately to avoid stock-outs",
        ));
    }

    if !tabs.overdue.is_empty() {
        alerts.push(Alert::new(
            AlertKind::OverdueCredit,
            "Overdue Payments",
            format!(
                "{} customers have overdue payments totaling {}",
                tabs.overdue.len(),
                rupees(tabs.overdue_outstanding)
            ),
            "Send payment reminders to improve cash flow",
        ));
    } else if tabs.total_outstanding > config.high_outstanding_threshold {
        alerts.push(Alert::new(
            AlertKind::OutstandingCredit,
            "Outstanding Credit",
            format!("{} pending from customers", rupees(tabs.total_outstanding)),
            "Follow up with customers for payment",
        ));
    }

    if alerts.is_empty() {
        alerts.push(Alert::new(
            AlertKind::AllClear,
            "All Good",
            "Your shop is running smoothly!".to_string(),
            "",
        ));
    }

    alerts
}

/// `"A, B, C"` or `"A, B, C and 2 more"`.
fn name_list(items: &[&InventoryItem], limit: usize) -> String {
    let shown: Vec<&str> = items.iter().take(limit).map(|i| i.name.as_str()).collect();
    let mut list = shown.join(", ");
    if items.len() > limit {
        list.push_str(&format!(" and {} more", items.len() - limit));
    }
    list
}

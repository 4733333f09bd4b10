//! Dashboard aggregation.
//!
//! No decisions of its own: counters are plain sums over the same scans the
//! classifier uses, recomputed from scratch on every call.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopledger_credit::CreditRecord;
use shopledger_inventory::InventoryItem;

use crate::alerts::{Alert, classify};
use crate::config::InsightConfig;
use crate::recommendations::{Recommendation, evaluate_recommendations};
use crate::scan::{CreditScan, InventoryScan};

/// Headline counters.
///
/// `active_alert_count` is `low_stock + expiring + expired + overdue_credit`;
/// an item that is both low and expiring counts twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_items: usize,
    pub low_stock_count: usize,
    pub total_outstanding: Decimal,
    pub active_alert_count: usize,
    pub expiring_count: usize,
    pub expired_count: usize,
    pub overdue_credit_count: usize,
    /// Stock valued at cost.
    pub inventory_value: Decimal,
}

/// Everything the dashboard shows for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub summary: DashboardSummary,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
}

pub fn summarize(
    inventory: &[InventoryItem],
    credit: &[CreditRecord],
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> DashboardSummary {
    let today = now.date_naive();
    let stock = InventoryScan::new(inventory, today, config.expiry_warning_days);
    let tabs = CreditScan::new(credit, today);

    let low_stock_count = stock.low_stock.len();
    let expiring_count = stock.expiring.len();
    let expired_count = stock.expired.len();
    let overdue_credit_count = tabs.overdue.len();

    DashboardSummary {
        total_items: inventory.len(),
        low_stock_count,
        total_outstanding: tabs.total_outstanding,
        active_alert_count: low_stock_count + expiring_count + expired_count + overdue_credit_count,
        expiring_count,
        expired_count,
        overdue_credit_count,
        inventory_value: inventory
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.stock_value())),
    }
}

/// Summary, alert feed and recommendations for one pair of snapshots.
pub fn compose_dashboard(
    inventory: &[InventoryItem],
    credit: &[CreditRecord],
    advisory: Option<Vec<Recommendation>>,
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> Dashboard {
    Dashboard {
        generated_at: now,
        summary: summarize(inventory, credit, now, config),
        alerts: classify(inventory, credit, now, config),
        recommendations: evaluate_recommendations(inventory, credit, advisory, now, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::alerts::AlertKind;
    use crate::fixtures::{credit, expiring_item, item, now};

    #[test]
    fn counters_are_not_deduplicated() {
        let mut low_and_expiring = expiring_item("Milk", 3);
        low_and_expiring.quantity = 2;
        let inventory = vec![low_and_expiring, expiring_item("Bread", -1), item("Oil", 50, 10)];
        let tabs = vec![credit("Asha", 700, -4), credit("Bala", 300, 9)];

        let summary = summarize(&inventory, &tabs, now(), &InsightConfig::default());
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.expiring_count, 1);
        assert_eq!(summary.expired_count, 1);
        assert_eq!(summary.overdue_credit_count, 1);
        assert_eq!(summary.active_alert_count, 4);
        assert_eq!(summary.total_outstanding, Decimal::from(1000));
    }

    #[test]
    fn inventory_value_is_quantity_times_cost() {
        // item fixtures cost 80 each
        let summary = summarize(
            &[item("Oil", 5, 1), item("Soap", 2, 1)],
            &[],
            now(),
            &InsightConfig::default(),
        );
        assert_eq!(summary.inventory_value, Decimal::from(560));
    }

    #[test]
    fn huge_stock_values_saturate_instead_of_panicking() {
        let mut bulk = item("Cement", 1, 1);
        bulk.quantity = u64::MAX;
        bulk.cost_price = Decimal::MAX;
        let inventory = vec![bulk.clone(), bulk];
        let tabs = vec![credit("Asha", 1, 5), credit("Bala", 1, 5)]
            .into_iter()
            .map(|mut r| {
                r.outstanding_amount = Decimal::MAX;
                r
            })
            .collect::<Vec<_>>();

        let summary = summarize(&inventory, &tabs, now(), &InsightConfig::default());
        assert_eq!(summary.inventory_value, Decimal::MAX);
        assert_eq!(summary.total_outstanding, Decimal::MAX);
    }

    #[test]
    fn empty_snapshots_still_compose() {
        let dashboard = compose_dashboard(&[], &[], None, now(), &InsightConfig::default());
        assert_eq!(dashboard.summary.total_items, 0);
        assert_eq!(dashboard.summary.active_alert_count, 0);
        assert_eq!(dashboard.alerts.len(), 1);
        assert_eq!(dashboard.alerts[0].kind, AlertKind::AllClear);
        assert_eq!(dashboard.recommendations.len(), 1);
        assert_eq!(dashboard.generated_at, now());
    }

    #[test]
    fn dashboard_serializes_camel_case() {
        let dashboard = compose_dashboard(&[item("Rice", 5, 10)], &[], None, now(), &InsightConfig::default());
        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["summary"]["lowStockCount"], 1);
        assert_eq!(json["alerts"][0]["priority"], "HIGH");
        assert_eq!(json["alerts"][0]["kind"], "LOW_STOCK");
    }
}

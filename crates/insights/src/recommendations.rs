//! Business recommendations.
//!
//! The advisory service's answer wins when it has one (top results, verbatim).
//! Otherwise local heuristics run, emitting in this order:
//! 1. restock low items
//! 2. promote high-margin, well-stocked items
//! 3. chase overdue credit, or else suggest credit limits when the total
//!    outstanding is high (never both)
//! 4. a generic "all good" entry when nothing above applied

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::money::rupees;
use shopledger_credit::CreditRecord;
use shopledger_inventory::InventoryItem;

use crate::config::InsightConfig;
use crate::scan::CreditScan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub impact: String,
}

impl Recommendation {
    pub fn new(title: impl Into<String>, description: impl Into<String>, impact: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            impact: impact.into(),
        }
    }
}

/// Advisory results when present and non-empty, local heuristics otherwise.
pub fn evaluate_recommendations(
    inventory: &[InventoryItem],
    credit: &[CreditRecord],
    advisory: Option<Vec<Recommendation>>,
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> Vec<Recommendation> {
    match advisory {
        Some(mut recommendations) if !recommendations.is_empty() => {
            recommendations.truncate(config.advisory_limit);
            recommendations
        }
        _ => generate_fallback(inventory, credit, now, config),
    }
}

/// Local heuristics used when the advisory service has nothing to offer.
pub fn generate_fallback(
    inventory: &[InventoryItem],
    credit: &[CreditRecord],
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> Vec<Recommendation> {
    let limit = config.recommendation_name_limit;
    let mut recs = Vec::new();

    let low_stock: Vec<&InventoryItem> = inventory.iter().filter(|i| i.is_low_stock()).collect();
    if !low_stock.is_empty() {
        let others = if low_stock.len() > limit { " and others" } else { "" };
        recs.push(Recommendation::new(
            "Restock Low Items",
            format!(
                "You have {} items running low. Order stock for {}{} to avoid running out.",
                low_stock.len(),
                first_names(&low_stock, limit),
                others
            ),
            "Prevents lost sales and keeps customers happy",
        ));
    }

    let high_margin: Vec<&InventoryItem> = inventory
        .iter()
        .filter(|i| {
            i.quantity > i.min_stock_level
                && i.margin().is_some_and(|m| m > config.promote_margin)
        })
        .collect();
    if !high_margin.is_empty() {
        recs.push(Recommendation::new(
            "Promote High Profit Items",
            format!(
                "Items like {} have good profit margins. Display them prominently to increase sales.",
                first_names(&high_margin, limit)
            ),
            "Increases your daily profit",
        ));
    }

    let tabs = CreditScan::new(credit, now.date_naive());
    if !tabs.overdue.is_empty() {
        recs.push(Recommendation::new(
            "Follow Up on Overdue Payments",
            format!(
                "{} customers have overdue payments totaling {}. Send friendly reminders to collect payments.",
                tabs.overdue.len(),
                rupees(tabs.overdue_outstanding)
            ),
            "Improves cash flow for your business",
        ));
    } else if tabs.total_outstanding > config.credit_limit_threshold {
        recs.push(Recommendation::new(
            "Manage Credit Wisely",
            format!(
                "You have {} in outstanding credit. Consider setting credit limits per customer to manage risk.",
                rupees(tabs.total_outstanding)
            ),
            "Protects your business from bad debts",
        ));
    }

    if recs.is_empty() {
        recs.push(Recommendation::new(
            "Everything Looks Good!",
            "Your shop is running smoothly. Keep tracking your inventory and credit to stay on top of your business.",
            "Consistent monitoring leads to better profits",
        ));
    }

    recs
}

fn first_names(items: &[&InventoryItem], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixtures::{credit, item, now, priced_item};

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title.as_str()).collect()
    }

    fn fallback(inventory: &[InventoryItem], credit: &[CreditRecord]) -> Vec<Recommendation> {
        generate_fallback(inventory, credit, now(), &InsightConfig::default())
    }

    #[test]
    fn advisory_results_are_taken_verbatim_up_to_three() {
        let advisory: Vec<Recommendation> = (1..=5)
            .map(|n| Recommendation::new(format!("Tip {n}"), "desc", "impact"))
            .collect();
        let recs = evaluate_recommendations(
            &[item("Rice", 1, 10)],
            &[],
            Some(advisory.clone()),
            now(),
            &InsightConfig::default(),
        );
        assert_eq!(recs, advisory[..3].to_vec());
    }

    #[test]
    fn empty_or_missing_advisory_falls_back() {
        let inventory = [item("Rice", 1, 10)];
        let config = InsightConfig::default();
        let from_empty = evaluate_recommendations(&inventory, &[], Some(Vec::new()), now(), &config);
        let from_none = evaluate_recommendations(&inventory, &[], None, now(), &config);
        assert_eq!(from_empty, from_none);
        assert_eq!(titles(&from_none), vec!["Restock Low Items"]);
    }

    #[test]
    fn restock_names_two_items_then_says_others() {
        let recs = fallback(
            &[item("Rice", 1, 10), item("Dal", 2, 10), item("Salt", 3, 10)],
            &[],
        );
        assert_eq!(
            recs[0].description,
            "You have 3 items running low. Order stock for Rice, Dal and others to avoid running out."
        );

        let recs = fallback(&[item("Rice", 1, 10)], &[]);
        assert_eq!(
            recs[0].description,
            "You have 1 items running low. Order stock for Rice to avoid running out."
        );
    }

    #[test]
    fn high_margin_requires_stock_above_minimum() {
        // 40% margin, well stocked.
        let ghee = priced_item("Ghee", 30, 60, 100);
        // 40% margin but only at the minimum level.
        let honey = priced_item("Honey", 10, 60, 100);
        // Exactly 35% margin does not qualify.
        let jam = priced_item("Jam", 30, 65, 100);

        let recs = fallback(&[ghee, honey, jam], &[]);
        assert_eq!(titles(&recs), vec!["Promote High Profit Items"]);
        assert!(recs[0].description.starts_with("Items like Ghee have"));
    }

    #[test]
    fn zero_selling_price_is_never_high_margin() {
        let free = priced_item("Sample", 30, 0, 0);
        assert_eq!(titles(&fallback(&[free], &[])), vec!["Everything Looks Good!"]);
    }

    #[test]
    fn overdue_takes_precedence_over_credit_limits() {
        let tabs = vec![credit("Asha", 3500, 5), credit("Bala", 250, -2)];
        let recs = fallback(&[], &tabs);
        assert_eq!(titles(&recs), vec!["Follow Up on Overdue Payments"]);
        assert!(recs[0].description.starts_with("1 customers have overdue payments totaling ₹250."));

        let recs = fallback(&[], &tabs[..1]);
        assert_eq!(titles(&recs), vec!["Manage Credit Wisely"]);
        assert!(recs[0].description.contains("₹3500"));
    }

    #[test]
    fn emission_order_is_fixed() {
        let inventory = vec![item("Rice", 1, 10), priced_item("Ghee", 30, 50, 100)];
        let recs = fallback(&inventory, &[credit("Bala", 250, -2)]);
        assert_eq!(
            titles(&recs),
            vec![
                "Restock Low Items",
                "Promote High Profit Items",
                "Follow Up on Overdue Payments",
            ]
        );
    }

    #[test]
    fn nothing_to_say_yields_all_good() {
        let recs = fallback(&[], &[]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Everything Looks Good!");
    }
}

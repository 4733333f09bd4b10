use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult, Entity, ItemId};

/// Reorder threshold applied when a write leaves it unset.
pub const DEFAULT_MIN_STOCK_LEVEL: u64 = 10;

/// Category tag for records stored without one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Unit label for records stored without one.
pub const DEFAULT_UNIT: &str = "pcs";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

fn default_min_stock_level() -> u64 {
    DEFAULT_MIN_STOCK_LEVEL
}

/// A stock record as held by the ledger store.
///
/// Names are unique per shop case-insensitively; that rule is enforced by the
/// reconciler, not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub selling_price: Decimal,
    #[serde(default = "default_min_stock_level")]
    pub min_stock_level: u64,
    /// `None` means the item does not expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl InventoryItem {
    /// Quantity strictly below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_stock_level
    }

    /// `(selling - cost) / selling`, or `None` when there is no selling price.
    pub fn margin(&self) -> Option<Decimal> {
        if self.selling_price <= Decimal::ZERO {
            return None;
        }
        Some((self.selling_price - self.cost_price) / self.selling_price)
    }

    /// Stock valued at cost, saturating at `Decimal::MAX`.
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.cost_price)
    }

    /// Name and category must be non-blank for a record to be stored.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category is required"));
        }
        Ok(())
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.item_id
    }
}

/// Items whose category equals `category` exactly, in snapshot order.
pub fn filter_by_category<'a>(items: &'a [InventoryItem], category: &str) -> Vec<&'a InventoryItem> {
    items.iter().filter(|i| i.category == category).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u64, min: u64) -> InventoryItem {
        InventoryItem {
            item_id: ItemId::new(),
            name: name.to_string(),
            category: "groceries".to_string(),
            quantity,
            unit: "kg".to_string(),
            cost_price: Decimal::new(40, 0),
            selling_price: Decimal::new(50, 0),
            min_stock_level: min,
            expiry_date: None,
        }
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        assert!(item("Rice", 9, 10).is_low_stock());
        assert!(!item("Rice", 10, 10).is_low_stock());
    }

    #[test]
    fn margin_uses_selling_price_as_denominator() {
        assert_eq!(item("Rice", 1, 1).margin(), Some(Decimal::new(2, 1)));

        let mut free = item("Sample", 1, 1);
        free.selling_price = Decimal::ZERO;
        assert_eq!(free.margin(), None);
    }

    #[test]
    fn stock_value_saturates_for_huge_quantities() {
        assert_eq!(item("Rice", 3, 1).stock_value(), Decimal::new(120, 0));

        let mut bulk = item("Cement", u64::MAX, 1);
        bulk.cost_price = Decimal::MAX;
        assert_eq!(bulk.stock_value(), Decimal::MAX);
    }

    #[test]
    fn blank_name_or_category_fails_validation() {
        assert!(item("Rice", 1, 1).validate().is_ok());

        let mut nameless = item("  ", 1, 1);
        assert_eq!(nameless.validate(), Err(DomainError::validation("name is required")));
        nameless.name = "Rice".to_string();
        nameless.category = String::new();
        assert_eq!(nameless.validate(), Err(DomainError::validation("category is required")));
    }

    #[test]
    fn stored_record_without_optional_fields_gets_defaults() {
        let json = r#"{"itemId":"0190a4a4-0000-7000-8000-000000000001","name":"Salt"}"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.unit, DEFAULT_UNIT);
        assert_eq!(item.min_stock_level, DEFAULT_MIN_STOCK_LEVEL);
        assert_eq!(item.quantity, 0);
        assert_eq!(item.expiry_date, None);
    }

    #[test]
    fn name_match_ignores_case_and_surrounding_whitespace() {
        let rice = item("Rice", 5, 10);
        assert!(rice.has_name("rice"));
        assert!(rice.has_name("  RICE "));
        assert!(!rice.has_name("Rice Flour"));
    }

    #[test]
    fn category_filter_is_exact() {
        let mut soap = item("Soap", 3, 5);
        soap.category = "personal care".to_string();
        let items = vec![item("Rice", 5, 10), soap];
        let groceries = filter_by_category(&items, "groceries");
        assert_eq!(groceries.len(), 1);
        assert_eq!(groceries[0].name, "Rice");
        assert!(filter_by_category(&items, "Groceries").is_empty());
    }
}

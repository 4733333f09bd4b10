//! Inventory write requests.
//!
//! Shop users type these into a form, so numeric fields are lenient: anything
//! that is not a valid non-negative number is treated as absent and replaced by
//! the field default during normalisation. Only `name` and `category` are
//! required.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult, ItemId};

use crate::item::{DEFAULT_MIN_STOCK_LEVEL, DEFAULT_UNIT, InventoryItem};

/// A create-or-edit request for one inventory item.
///
/// `item_id` set means "edit this exact item in place"; unset means "add stock
/// by name" and goes through duplicate detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cost_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub selling_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub min_stock_level: Option<u64>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub expiry_date: Option<NaiveDate>,
}

/// A validated draft with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDraft {
    pub name: String,
    pub category: String,
    pub quantity: u64,
    pub unit: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub min_stock_level: u64,
    pub expiry_date: Option<NaiveDate>,
}

impl ItemDraft {
    pub fn named(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_min_stock_level(mut self, min_stock_level: u64) -> Self {
        self.min_stock_level = Some(min_stock_level);
        self
    }

    pub fn with_prices(mut self, cost_price: Decimal, selling_price: Decimal) -> Self {
        self.cost_price = Some(cost_price);
        self.selling_price = Some(selling_price);
        self
    }

    pub fn with_expiry_date(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn targeting(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// Validate required fields and coerce the rest to defaults.
    pub fn normalize(&self) -> DomainResult<NormalizedDraft> {
        let name = required(self.name.as_deref(), "name")?;
        let category = required(self.category.as_deref(), "category")?;

        let unit = self
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_UNIT)
            .to_string();

        Ok(NormalizedDraft {
            name,
            category,
            quantity: self.quantity.unwrap_or(0),
            unit,
            cost_price: self.cost_price.unwrap_or(Decimal::ZERO),
            selling_price: self.selling_price.unwrap_or(Decimal::ZERO),
            min_stock_level: self.min_stock_level.unwrap_or(DEFAULT_MIN_STOCK_LEVEL),
            expiry_date: self.expiry_date,
        })
    }
}

impl NormalizedDraft {
    pub fn into_item(self, item_id: ItemId) -> InventoryItem {
        InventoryItem {
            item_id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            cost_price: self.cost_price,
            selling_price: self.selling_price,
            min_stock_level: self.min_stock_level,
            expiry_date: self.expiry_date,
        }
    }
}

fn required(value: Option<&str>, field: &str) -> DomainResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::validation(format!("{field} is required"))),
    }
}

/// Forgiving field parsers: invalid input becomes `None`, never an error.
pub(crate) mod lenient {
    use core::str::FromStr;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(count_from_value))
    }

    pub fn amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(amount_from_value))
    }

    pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => parse_date(&s),
            _ => None,
        })
    }

    fn count_from_value(value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_non_negative)),
            Value::String(s) => parse_count(s),
            _ => None,
        }
    }

    fn amount_from_value(value: &Value) -> Option<Decimal> {
        match value {
            Value::Number(n) => parse_amount(&n.to_string()),
            Value::String(s) => parse_amount(s),
            _ => None,
        }
    }

    fn whole_non_negative(f: f64) -> Option<u64> {
        (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64)
    }

    pub fn parse_count(raw: &str) -> Option<u64> {
        let raw = raw.trim();
        raw.parse::<u64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().and_then(whole_non_negative))
    }

    pub fn parse_amount(raw: &str) -> Option<Decimal> {
        let raw = raw.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
            .filter(|d| *d >= Decimal::ZERO)
    }

    /// Accepts `YYYY-MM-DD` or an ISO timestamp whose first ten characters are one.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

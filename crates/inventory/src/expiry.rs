//! Calendar expiry classification.
//!
//! Expiry is compared by calendar day: an item expiring today has zero days
//! left and is not yet expired.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Where an item stands relative to its expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "days", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryState {
    NoExpiry,
    /// Expiry date is before today; carries how many days ago.
    Expired(u32),
    /// Expires within the warning window; carries days left (0 = today).
    ExpiringSoon(u32),
    /// Expires later than the warning window.
    Fresh(u32),
}

impl ExpiryState {
    pub fn is_expired(self) -> bool {
        matches!(self, ExpiryState::Expired(_))
    }

    pub fn is_expiring_soon(self) -> bool {
        matches!(self, ExpiryState::ExpiringSoon(_))
    }
}

/// Whole days from `today` until the item's expiry date (negative once past).
pub fn days_to_expiry(item: &InventoryItem, today: NaiveDate) -> Option<i64> {
    item.expiry_date
        .map(|expiry| expiry.signed_duration_since(today).num_days())
}

/// Classify an item against a warning window of `warning_days`.
pub fn expiry_state(item: &InventoryItem, today: NaiveDate, warning_days: u32) -> ExpiryState {
    let Some(days) = days_to_expiry(item, today) else {
        return ExpiryState::NoExpiry;
    };
    let clamp = |d: i64| u32::try_from(d).unwrap_or(u32::MAX);

    if days < 0 {
        ExpiryState::Expired(clamp(-days))
    } else if days <= i64::from(warning_days) {
        ExpiryState::ExpiringSoon(clamp(days))
    } else {
        ExpiryState::Fresh(clamp(days))
    }
}

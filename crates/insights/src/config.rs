use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Thresholds used by the alert classifier and the fallback recommender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightConfig {
    /// Items expiring within this many days (inclusive) are "expiring soon".
    pub expiry_warning_days: u32,
    /// Total outstanding credit above which a no-overdue alert is raised.
    pub high_outstanding_threshold: Decimal,
    /// Total outstanding credit above which per-customer limits are suggested.
    pub credit_limit_threshold: Decimal,
    /// Margin above which well-stocked items are worth promoting.
    pub promote_margin: Decimal,
    /// Names listed in an alert message before "and N more".
    pub alert_name_limit: usize,
    /// Names listed in a recommendation before "and others".
    pub recommendation_name_limit: usize,
    /// Advisory results shown when the advisory service answers.
    pub advisory_limit: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            expiry_warning_days: 30,
            high_outstanding_threshold: Decimal::from(5_000),
            credit_limit_threshold: Decimal::from(3_000),
            promote_margin: Decimal::new(35, 2),
            alert_name_limit: 3,
            recommendation_name_limit: 2,
            advisory_limit: 3,
        }
    }
}

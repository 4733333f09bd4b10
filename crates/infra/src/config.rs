//! Process configuration from environment variables.

use std::str::FromStr;

use rust_decimal::Decimal;

use shopledger_credit::DEFAULT_CREDIT_TERM_DAYS;
use shopledger_insights::InsightConfig;

pub const ENV_EXPIRY_WARNING_DAYS: &str = "SHOPLEDGER_EXPIRY_WARNING_DAYS";
pub const ENV_HIGH_OUTSTANDING: &str = "SHOPLEDGER_HIGH_OUTSTANDING";
pub const ENV_CREDIT_LIMIT_THRESHOLD: &str = "SHOPLEDGER_CREDIT_LIMIT_THRESHOLD";
pub const ENV_PROMOTE_MARGIN: &str = "SHOPLEDGER_PROMOTE_MARGIN";
pub const ENV_CREDIT_TERM_DAYS: &str = "SHOPLEDGER_CREDIT_TERM_DAYS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub insights: InsightConfig,
    /// Days until a grant without a due date falls due.
    pub credit_term_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            insights: InsightConfig::default(),
            credit_term_days: DEFAULT_CREDIT_TERM_DAYS,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by any `SHOPLEDGER_*` variables that parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let insights = InsightConfig {
            expiry_warning_days: parsed(&lookup, ENV_EXPIRY_WARNING_DAYS)
                .unwrap_or(defaults.insights.expiry_warning_days),
            high_outstanding_threshold: parsed::<Decimal>(&lookup, ENV_HIGH_OUTSTANDING)
                .unwrap_or(defaults.insights.high_outstanding_threshold),
            credit_limit_threshold: parsed::<Decimal>(&lookup, ENV_CREDIT_LIMIT_THRESHOLD)
                .unwrap_or(defaults.insights.credit_limit_threshold),
            promote_margin: parsed::<Decimal>(&lookup, ENV_PROMOTE_MARGIN)
                .unwrap_or(defaults.insights.promote_margin),
            ..defaults.insights
        };

        Self {
            insights,
            credit_term_days: parsed(&lookup, ENV_CREDIT_TERM_DAYS).unwrap_or(defaults.credit_term_days),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable configuration value");
            None
        }
    }
}

//! `shopledger-insights`
//!
//! **Responsibility:** derived views over ledger snapshots.
//!
//! Everything here is a pure function of an inventory snapshot, a credit
//! snapshot and the current time:
//! - It must not mutate ledger state.
//! - It produces alerts, recommendations and counters fresh on every call;
//!   nothing is cached or persisted.

pub mod alerts;
pub mod config;
pub mod dashboard;
pub mod recommendations;
pub mod scan;

pub use alerts::{Alert, AlertKind, AlertPriority, classify};
pub use config::InsightConfig;
pub use dashboard::{Dashboard, DashboardSummary, compose_dashboard, summarize};
pub use recommendations::{Recommendation, evaluate_recommendations, generate_fallback};
pub use scan::{CreditScan, InventoryScan};

#[cfg(test)]
pub(crate) mod fixtures;

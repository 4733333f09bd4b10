//! `shopledger-infra`
//!
//! Application layer over the pure domain crates: async persistence, the
//! advisory client seam, services that load fresh snapshots per call, the
//! dashboard loader and request dispatch.

pub mod advisory;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod seed;
pub mod services;
pub mod store;

pub use advisory::{AdvisoryError, AdvisoryService, NoAdvisory, StaticAdvisory};
pub use config::AppConfig;
pub use dashboard::DashboardLoader;
pub use dispatch::{LedgerDispatcher, LedgerRequest, LedgerResponse};
pub use error::ServiceError;
pub use services::{CreditListing, CreditService, CustomerRisk, InventoryService};
pub use store::{InMemoryLedgerStore, LedgerStore, StoreError};

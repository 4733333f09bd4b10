//! Inventory ledger domain module.
//!
//! Business rules for stock records, implemented purely as deterministic
//! domain logic over snapshots (no IO, no HTTP, no storage):
//! - `item`: the stored `InventoryItem` shape and its derived predicates.
//! - `draft`: lenient write requests as typed by shop users.
//! - `expiry`: calendar expiry classification.
//! - `reconcile`: two-phase create / update / merge decisions.

pub mod draft;
pub mod expiry;
pub mod item;
pub mod reconcile;

pub use draft::ItemDraft;
pub use expiry::{ExpiryState, days_to_expiry, expiry_state};
pub use item::{DEFAULT_CATEGORY, DEFAULT_MIN_STOCK_LEVEL, DEFAULT_UNIT, InventoryItem, filter_by_category};
pub use reconcile::{
    AppliedWrite, MergeConfirmation, ReconcileAction, ReconciliationDecision, apply_reconciliation,
    ensure_deletable, propose_reconciliation, rebase_decision,
};

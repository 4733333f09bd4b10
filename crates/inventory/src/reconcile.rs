//! Inventory reconciliation: turning a write request into a ledger decision.
//!
//! Two-phase contract:
//! 1. `propose_reconciliation(draft, snapshot)` decides CREATE, UPDATE or MERGE
//!    against the latest store snapshot without mutating anything.
//! 2. `apply_reconciliation(decision, confirmation)` produces the record to
//!    persist. A MERGE is only applied once the caller has confirmed it.
//!
//! Rules:
//! - A draft carrying `item_id` is an edit-in-place: every mutable field of that
//!   item is overwritten and no duplicate search runs.
//! - A draft without `item_id` whose name matches an existing item
//!   (case-insensitively) proposes adding its quantity to that item; all other
//!   fields of the existing item are kept.
//! - Otherwise a new item with a fresh id is created.

use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult, Entity, ItemId, find_by_id};

use crate::draft::ItemDraft;
use crate::item::InventoryItem;

/// What a write does to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconcileAction {
    Create,
    Update,
    Merge,
}

/// Outcome of the proposal phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconciliationDecision {
    /// New item with a freshly allocated id.
    Create { item: InventoryItem },
    /// Full overwrite of an existing item addressed by id.
    Update { item: InventoryItem },
    /// Same-name item found; `item` is `existing` with `added_quantity` added.
    #[serde(rename_all = "camelCase")]
    Merge {
        existing: InventoryItem,
        added_quantity: u64,
        item: InventoryItem,
    },
}

impl ReconciliationDecision {
    pub fn action(&self) -> ReconcileAction {
        match self {
            ReconciliationDecision::Create { .. } => ReconcileAction::Create,
            ReconciliationDecision::Update { .. } => ReconcileAction::Update,
            ReconciliationDecision::Merge { .. } => ReconcileAction::Merge,
        }
    }

    /// The record that would be persisted if this decision is applied.
    pub fn item(&self) -> &InventoryItem {
        match self {
            ReconciliationDecision::Create { item }
            | ReconciliationDecision::Update { item }
            | ReconciliationDecision::Merge { item, .. } => item,
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        self.action() == ReconcileAction::Merge
    }
}

/// Caller's answer to a merge proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeConfirmation {
    Confirmed,
    Unconfirmed,
}

/// Result of the apply phase, ready for `upsert` in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedWrite {
    pub item: InventoryItem,
    pub merged: bool,
}

/// Decide how `draft` lands in the ledger given the current `snapshot`.
pub fn propose_reconciliation(
    draft: &ItemDraft,
    snapshot: &[InventoryItem],
) -> DomainResult<ReconciliationDecision> {
    let normalized = draft.normalize()?;

    if let Some(item_id) = draft.item_id {
        // Edits are id-addressed; the target must exist.
        if find_by_id(snapshot, &item_id).is_none() {
            return Err(DomainError::not_found());
        }
        return Ok(ReconciliationDecision::Update {
            item: normalized.into_item(item_id),
        });
    }

    if let Some(existing) = snapshot.iter().find(|i| i.has_name(&normalized.name)) {
        let mut item = existing.clone();
        item.quantity = existing.quantity.saturating_add(normalized.quantity);
        return Ok(ReconciliationDecision::Merge {
            existing: existing.clone(),
            added_quantity: normalized.quantity,
            item,
        });
    }

    Ok(ReconciliationDecision::Create {
        item: normalized.into_item(ItemId::new()),
    })
}

/// Turn an accepted decision into the record to persist.
///
/// An unconfirmed MERGE is a `Conflict`: the name collision is surfaced to the
/// caller, never resolved silently.
pub fn apply_reconciliation(
    decision: ReconciliationDecision,
    confirmation: MergeConfirmation,
) -> DomainResult<AppliedWrite> {
    match decision {
        ReconciliationDecision::Create { item } | ReconciliationDecision::Update { item } => {
            Ok(AppliedWrite { item, merged: false })
        }
        ReconciliationDecision::Merge { existing, item, .. } => match confirmation {
            MergeConfirmation::Confirmed => Ok(AppliedWrite { item, merged: true }),
            MergeConfirmation::Unconfirmed => Err(DomainError::conflict(format!(
                "\"{}\" already exists with quantity {}; merge requires confirmation",
                existing.name, existing.quantity
            ))),
        },
    }
}

/// Re-check a proposal against a newer snapshot before it is applied.
///
/// Decisions may come back from a client, so the record is validated again.
/// A merge is re-based onto the item's current quantity so a stale proposal
/// never overwrites stock recorded in between. A create whose name or id has
/// since been taken becomes a `Conflict`; an update or merge whose target has
/// vanished is `NotFound`.
pub fn rebase_decision(
    decision: ReconciliationDecision,
    snapshot: &[InventoryItem],
) -> DomainResult<ReconciliationDecision> {
    match decision {
        ReconciliationDecision::Create { item } => {
            item.validate()?;
            if find_by_id(snapshot, item.id()).is_some() {
                return Err(DomainError::conflict(format!("item id {} is already in use", item.item_id)));
            }
            if let Some(taken) = snapshot.iter().find(|i| i.has_name(&item.name)) {
                return Err(DomainError::conflict(format!(
                    "\"{}\" was added in the meantime",
                    taken.name
                )));
            }
            Ok(ReconciliationDecision::Create { item })
        }
        ReconciliationDecision::Update { item } => {
            item.validate()?;
            if find_by_id(snapshot, item.id()).is_none() {
                return Err(DomainError::not_found());
            }
            Ok(ReconciliationDecision::Update { item })
        }
        ReconciliationDecision::Merge {
            existing,
            added_quantity,
            ..
        } => {
            let current = find_by_id(snapshot, existing.id()).ok_or_else(DomainError::not_found)?;
            let mut item = current.clone();
            item.quantity = current.quantity.saturating_add(added_quantity);
            Ok(ReconciliationDecision::Merge {
                existing: current.clone(),
                added_quantity,
                item,
            })
        }
    }
}

/// Check that `item_id` is present before an unconditional delete.
pub fn ensure_deletable(item_id: ItemId, snapshot: &[InventoryItem]) -> DomainResult<&InventoryItem> {
    find_by_id(snapshot, &item_id).ok_or_else(DomainError::not_found)
}

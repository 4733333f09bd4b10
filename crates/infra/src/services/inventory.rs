use tracing::{debug, info};

use shopledger_core::{ItemId, ShopId};
use shopledger_inventory::{
    AppliedWrite, InventoryItem, ItemDraft, MergeConfirmation, ReconciliationDecision, apply_reconciliation,
    ensure_deletable, filter_by_category, propose_reconciliation, rebase_decision,
};

use crate::error::ServiceError;
use crate::store::LedgerStore;

/// Inventory writes go through the two-phase reconciler.
///
/// Proposals and commits each read the store afresh, so a proposal made
/// against an older snapshot is re-based (or rejected) before it is written.
#[derive(Debug, Clone)]
pub struct InventoryService<S> {
    store: S,
}

impl<S: LedgerStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Items in insertion order, optionally limited to one category.
    pub async fn list(
        &self,
        shop_id: ShopId,
        category: Option<&str>,
    ) -> Result<Vec<InventoryItem>, ServiceError> {
        let items = self.store.list_inventory(shop_id).await?;
        Ok(match category {
            Some(category) => filter_by_category(&items, category).into_iter().cloned().collect(),
            None => items,
        })
    }

    pub async fn propose(
        &self,
        shop_id: ShopId,
        draft: &ItemDraft,
    ) -> Result<ReconciliationDecision, ServiceError> {
        let snapshot = self.store.list_inventory(shop_id).await?;
        let decision = propose_reconciliation(draft, &snapshot)?;
        debug!(
            shop_id = %shop_id,
            action = ?decision.action(),
            item = %decision.item().name,
            "inventory write proposed"
        );
        Ok(decision)
    }

    pub async fn commit(
        &self,
        shop_id: ShopId,
        decision: ReconciliationDecision,
        confirmation: MergeConfirmation,
    ) -> Result<AppliedWrite, ServiceError> {
        let snapshot = self.store.list_inventory(shop_id).await?;
        let decision = rebase_decision(decision, &snapshot)?;
        let action = decision.action();
        let applied = apply_reconciliation(decision, confirmation)?;

        let item = self.store.upsert_inventory(shop_id, applied.item).await?;
        info!(
            shop_id = %shop_id,
            item_id = %item.item_id,
            action = ?action,
            quantity = item.quantity,
            "inventory item saved"
        );
        Ok(AppliedWrite {
            item,
            merged: applied.merged,
        })
    }

    /// Propose and commit in one step.
    ///
    /// A merge still needs `MergeConfirmation::Confirmed`; without it this
    /// fails with a conflict and nothing is written.
    pub async fn upsert(
        &self,
        shop_id: ShopId,
        draft: &ItemDraft,
        confirmation: MergeConfirmation,
    ) -> Result<AppliedWrite, ServiceError> {
        let decision = self.propose(shop_id, draft).await?;
        self.commit(shop_id, decision, confirmation).await
    }

    pub async fn delete(&self, shop_id: ShopId, item_id: ItemId) -> Result<InventoryItem, ServiceError> {
        let snapshot = self.store.list_inventory(shop_id).await?;
        let removed = ensure_deletable(item_id, &snapshot)?.clone();
        self.store.delete_inventory(shop_id, item_id).await?;
        info!(shop_id = %shop_id, item_id = %item_id, name = %removed.name, "inventory item deleted");
        Ok(removed)
    }
}

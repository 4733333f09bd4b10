//! Shop-scoped persistence for the two ledgers.
//!
//! The store is a plain keyed collection: it never validates, merges or
//! derives anything. Every rule lives in the domain crates and the services
//! layered on top.

mod in_memory;

pub use in_memory::InMemoryLedgerStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use shopledger_core::{CustomerId, ItemId, ShopId};
use shopledger_credit::CreditRecord;
use shopledger_inventory::InventoryItem;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Async persistence for inventory items and credit records.
///
/// Lists return records in insertion order. Upserts replace by id and keep the
/// record's original position.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn list_inventory(&self, shop_id: ShopId) -> Result<Vec<InventoryItem>, StoreError>;

    async fn upsert_inventory(
        &self,
        shop_id: ShopId,
        item: InventoryItem,
    ) -> Result<InventoryItem, StoreError>;

    /// Fails with `NotFound` when no item has `item_id`.
    async fn delete_inventory(&self, shop_id: ShopId, item_id: ItemId) -> Result<(), StoreError>;

    async fn list_credit(&self, shop_id: ShopId) -> Result<Vec<CreditRecord>, StoreError>;

    async fn get_credit(
        &self,
        shop_id: ShopId,
        customer_id: CustomerId,
    ) -> Result<Option<CreditRecord>, StoreError>;

    async fn put_credit(
        &self,
        shop_id: ShopId,
        record: CreditRecord,
    ) -> Result<CreditRecord, StoreError>;
}

#[async_trait]
impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    async fn list_inventory(&self, shop_id: ShopId) -> Result<Vec<InventoryItem>, StoreError> {
        (**self).list_inventory(shop_id).await
    }

    async fn upsert_inventory(
        &self,
        shop_id: ShopId,
        item: InventoryItem,
    ) -> Result<InventoryItem, StoreError> {
        (**self).upsert_inventory(shop_id, item).await
    }

    async fn delete_inventory(&self, shop_id: ShopId, item_id: ItemId) -> Result<(), StoreError> {
        (**self).delete_inventory(shop_id, item_id).await
    }

    async fn list_credit(&self, shop_id: ShopId) -> Result<Vec<CreditRecord>, StoreError> {
        (**self).list_credit(shop_id).await
    }

    async fn get_credit(
        &self,
        shop_id: ShopId,
        customer_id: CustomerId,
    ) -> Result<Option<CreditRecord>, StoreError> {
        (**self).get_credit(shop_id, customer_id).await
    }

    async fn put_credit(
        &self,
        shop_id: ShopId,
        record: CreditRecord,
    ) -> Result<CreditRecord, StoreError> {
        (**self).put_credit(shop_id, record).await
    }
}

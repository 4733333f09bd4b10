use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use shopledger_core::{CustomerId, ItemId, ShopId, find_by_id, remove_by_id, upsert_by_id};
use shopledger_credit::CreditRecord;
use shopledger_inventory::InventoryItem;

use super::{LedgerStore, StoreError};

#[derive(Debug, Default)]
struct ShopLedgers {
    inventory: Vec<InventoryItem>,
    credit: Vec<CreditRecord>,
}

/// In-memory shop-isolated store for tests, demos and dev.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<HashMap<ShopId, ShopLedgers>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ShopId, ShopLedgers>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ShopId, ShopLedgers>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("ledger lock poisoned".to_string()))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn list_inventory(&self, shop_id: ShopId) -> Result<Vec<InventoryItem>, StoreError> {
        let map = self.read()?;
        Ok(map
            .get(&shop_id)
            .map(|shop| shop.inventory.clone())
            .unwrap_or_default())
    }

    async fn upsert_inventory(
        &self,
        shop_id: ShopId,
        item: InventoryItem,
    ) -> Result<InventoryItem, StoreError> {
        let mut map = self.write()?;
        let shop = map.entry(shop_id).or_default();
        upsert_by_id(&mut shop.inventory, item.clone());
        Ok(item)
    }

    async fn delete_inventory(&self, shop_id: ShopId, item_id: ItemId) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let shop = map
            .get_mut(&shop_id)
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))?;
        if !remove_by_id(&mut shop.inventory, &item_id) {
            return Err(StoreError::NotFound(item_id.to_string()));
        }
        Ok(())
    }

    async fn list_credit(&self, shop_id: ShopId) -> Result<Vec<CreditRecord>, StoreError> {
        let map = self.read()?;
        Ok(map
            .get(&shop_id)
            .map(|shop| shop.credit.clone())
            .unwrap_or_default())
    }

    async fn get_credit(
        &self,
        shop_id: ShopId,
        customer_id: CustomerId,
    ) -> Result<Option<CreditRecord>, StoreError> {
        let map = self.read()?;
        Ok(map
            .get(&shop_id)
            .and_then(|shop| find_by_id(&shop.credit, &customer_id))
            .cloned())
    }

    async fn put_credit(
        &self,
        shop_id: ShopId,
        record: CreditRecord,
    ) -> Result<CreditRecord, StoreError> {
        let mut map = self.write()?;
        let shop = map.entry(shop_id).or_default();
        upsert_by_id(&mut shop.credit, record.clone());
        Ok(record)
    }
}

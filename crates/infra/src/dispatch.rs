//! Request dispatch for ledger writes.
//!
//! Every write a client can make arrives as one `LedgerRequest`, tagged by
//! `action`:
//!
//! ```text
//! { "action": "upsert_item", "name": "Rice", "category": "groceries", "quantity": "5" }
//! { "action": "confirm_merge", "decision": { "action": "MERGE", ... } }
//! { "action": "delete_item", "itemId": "..." }
//! { "action": "grant_credit", "customerName": "Asha", "amount": "250" }
//! { "action": "record_payment", "customerId": "...", "amount": "100" }
//! ```
//!
//! `upsert_item` never merges on its own: a name collision comes back as
//! `merge_proposed` and is only applied by a later `confirm_merge` carrying
//! that proposal. `confirm_merge` accepts MERGE decisions only.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info_span};

use shopledger_core::{CustomerId, DomainError, ItemId, ShopId};
use shopledger_credit::{CreditRecord, GrantRequest};
use shopledger_inventory::{AppliedWrite, InventoryItem, ItemDraft, MergeConfirmation, ReconciliationDecision};

use crate::error::ServiceError;
use crate::services::{CreditService, InventoryService};
use crate::store::LedgerStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LedgerRequest {
    UpsertItem(ItemDraft),
    ConfirmMerge {
        decision: ReconciliationDecision,
    },
    #[serde(rename_all = "camelCase")]
    DeleteItem {
        item_id: ItemId,
    },
    GrantCredit(GrantRequest),
    #[serde(rename_all = "camelCase")]
    RecordPayment {
        customer_id: CustomerId,
        amount: Decimal,
    },
}

impl LedgerRequest {
    pub fn action(&self) -> &'static str {
        match self {
            LedgerRequest::UpsertItem(_) => "upsert_item",
            LedgerRequest::ConfirmMerge { .. } => "confirm_merge",
            LedgerRequest::DeleteItem { .. } => "delete_item",
            LedgerRequest::GrantCredit(_) => "grant_credit",
            LedgerRequest::RecordPayment { .. } => "record_payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LedgerResponse {
    ItemSaved(AppliedWrite),
    /// Nothing was written; resubmit `decision` via `confirm_merge` to apply.
    MergeProposed {
        decision: ReconciliationDecision,
    },
    ItemDeleted {
        item: InventoryItem,
    },
    CreditUpdated {
        record: CreditRecord,
    },
}

/// Routes requests to the inventory and credit services over one store.
#[derive(Debug, Clone)]
pub struct LedgerDispatcher<S> {
    inventory: InventoryService<Arc<S>>,
    credit: CreditService<Arc<S>>,
}

impl<S: LedgerStore> LedgerDispatcher<S> {
    pub fn new(store: Arc<S>, credit_term_days: u32) -> Self {
        Self {
            inventory: InventoryService::new(store.clone()),
            credit: CreditService::new(store, credit_term_days),
        }
    }

    pub fn inventory(&self) -> &InventoryService<Arc<S>> {
        &self.inventory
    }

    pub fn credit(&self) -> &CreditService<Arc<S>> {
        &self.credit
    }

    pub async fn dispatch(
        &self,
        shop_id: ShopId,
        request: LedgerRequest,
        now: DateTime<Utc>,
    ) -> Result<LedgerResponse, ServiceError> {
        let span = info_span!("ledger_request", shop_id = %shop_id, action = request.action());
        self.route(shop_id, request, now).instrument(span).await
    }

    async fn route(
        &self,
        shop_id: ShopId,
        request: LedgerRequest,
        now: DateTime<Utc>,
    ) -> Result<LedgerResponse, ServiceError> {
        match request {
            LedgerRequest::UpsertItem(draft) => {
                let decision = self.inventory.propose(shop_id, &draft).await?;
                if decision.requires_confirmation() {
                    return Ok(LedgerResponse::MergeProposed { decision });
                }
                let applied = self
                    .inventory
                    .commit(shop_id, decision, MergeConfirmation::Unconfirmed)
                    .await?;
                Ok(LedgerResponse::ItemSaved(applied))
            }
            LedgerRequest::ConfirmMerge { decision } => {
                if !decision.requires_confirmation() {
                    return Err(DomainError::validation(format!(
                        "confirm_merge expects a MERGE decision, got {:?}",
                        decision.action()
                    ))
                    .into());
                }
                let applied = self
                    .inventory
                    .commit(shop_id, decision, MergeConfirmation::Confirmed)
                    .await?;
                Ok(LedgerResponse::ItemSaved(applied))
            }
            LedgerRequest::DeleteItem { item_id } => {
                let item = self.inventory.delete(shop_id, item_id).await?;
                Ok(LedgerResponse::ItemDeleted { item })
            }
            LedgerRequest::GrantCredit(grant) => {
                let record = self.credit.grant(shop_id, &grant, now).await?;
                Ok(LedgerResponse::CreditUpdated { record })
            }
            LedgerRequest::RecordPayment { customer_id, amount } => {
                let record = self
                    .credit
                    .record_payment(shop_id, customer_id, amount, now)
                    .await?;
                Ok(LedgerResponse::CreditUpdated { record })
            }
        }
    }
}

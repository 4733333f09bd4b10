//! Seeding a shop from a list of ledger requests.
//!
//! Seed files are a JSON array of `LedgerRequest`s. Applying a seed confirms
//! any merge it proposes, so repeating an item name adds stock.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use shopledger_core::{CustomerId, ShopId};
use shopledger_credit::GrantRequest;
use shopledger_inventory::ItemDraft;

use crate::dispatch::{LedgerDispatcher, LedgerRequest, LedgerResponse};
use crate::error::ServiceError;
use crate::store::LedgerStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed {
    pub requests: Vec<LedgerRequest>,
}

impl Seed {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// A small kirana shop with something for every alert rule.
    pub fn sample(today: NaiveDate) -> Self {
        let asha = CustomerId::new();
        let bala = CustomerId::new();
        let item = |name: &str, category: &str, quantity: u64, cost: i64, sell: i64| {
            ItemDraft::named(name, category)
                .with_quantity(quantity)
                .with_prices(Decimal::from(cost), Decimal::from(sell))
        };

        let requests = vec![
            LedgerRequest::UpsertItem(item("Basmati Rice", "groceries", 40, 60, 75)),
            LedgerRequest::UpsertItem(item("Toor Dal", "groceries", 4, 110, 130)),
            LedgerRequest::UpsertItem(
                item("Milk", "dairy", 20, 24, 28).with_expiry_date(today + Duration::days(2)),
            ),
            LedgerRequest::UpsertItem(
                item("Bread", "bakery", 6, 30, 40).with_expiry_date(today - Duration::days(1)),
            ),
            LedgerRequest::UpsertItem(item("Desi Ghee", "dairy", 25, 420, 680)),
            LedgerRequest::UpsertItem(item("basmati rice", "groceries", 15, 60, 75)),
            LedgerRequest::GrantCredit(
                GrantRequest::new("Asha Devi", Decimal::from(1_200))
                    .for_customer(asha)
                    .due_on(today - Duration::days(5))
                    .with_items(vec!["5kg atta".to_string(), "1L oil".to_string()]),
            ),
            LedgerRequest::GrantCredit(
                GrantRequest::new("Bala Kumar", Decimal::from(4_500))
                    .for_customer(bala)
                    .due_on(today + Duration::days(10)),
            ),
            LedgerRequest::RecordPayment {
                customer_id: bala,
                amount: Decimal::from(500),
            },
        ];
        Self { requests }
    }

    /// Dispatch every request in order; returns how many were applied.
    pub async fn apply<S: LedgerStore>(
        self,
        dispatcher: &LedgerDispatcher<S>,
        shop_id: ShopId,
        now: DateTime<Utc>,
    ) -> Result<usize, ServiceError> {
        let mut applied = 0;
        for request in self.requests {
            let response = dispatcher.dispatch(shop_id, request, now).await?;
            if let LedgerResponse::MergeProposed { decision } = response {
                debug!(item = %decision.item().name, "seed confirms merge");
                dispatcher
                    .dispatch(shop_id, LedgerRequest::ConfirmMerge { decision }, now)
                    .await?;
            }
            applied += 1;
        }
        Ok(applied)
    }
}

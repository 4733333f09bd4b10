//! Dashboard loading.
//!
//! Inventory, credit and advisory are fetched concurrently. A failed source
//! degrades to an empty snapshot (or local recommendations) and is logged; it
//! never fails the whole dashboard.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use shopledger_core::ShopId;
use shopledger_credit::refresh_statuses;
use shopledger_insights::{Dashboard, InsightConfig, compose_dashboard};

use crate::advisory::{AdvisoryError, AdvisoryService};
use crate::store::LedgerStore;

#[derive(Debug, Clone)]
pub struct DashboardLoader<S, A> {
    store: S,
    advisory: A,
    config: InsightConfig,
}

impl<S, A> DashboardLoader<S, A>
where
    S: LedgerStore,
    A: AdvisoryService,
{
    pub fn new(store: S, advisory: A, config: InsightConfig) -> Self {
        Self {
            store,
            advisory,
            config,
        }
    }

    pub async fn load(&self, shop_id: ShopId, now: DateTime<Utc>) -> Dashboard {
        let (inventory, credit, advisory) = tokio::join!(
            self.store.list_inventory(shop_id),
            self.store.list_credit(shop_id),
            self.advisory.recommendations(shop_id),
        );

        let inventory = inventory.unwrap_or_else(|err| {
            warn!(shop_id = %shop_id, error = %err, "inventory unavailable; using empty snapshot");
            Vec::new()
        });
        let mut credit = credit.unwrap_or_else(|err| {
            warn!(shop_id = %shop_id, error = %err, "credit unavailable; using empty snapshot");
            Vec::new()
        });
        refresh_statuses(&mut credit, now);

        let advisory = match advisory {
            Ok(recommendations) => Some(recommendations),
            Err(AdvisoryError::Unavailable) => {
                debug!(shop_id = %shop_id, "no advisory service; using local heuristics");
                None
            }
            Err(err) => {
                warn!(shop_id = %shop_id, error = %err, "advisory failed; using local heuristics");
                None
            }
        };

        compose_dashboard(&inventory, &credit, advisory, now, &self.config)
    }
}

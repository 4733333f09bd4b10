//! Prints one shop's dashboard as pretty JSON.
//!
//! Usage: `shopledger-dashboard [seed.json]`. Without a seed file the built-in
//! sample shop is used. Thresholds come from `SHOPLEDGER_*` variables and log
//! filtering from `RUST_LOG`.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use shopledger_core::ShopId;
use shopledger_infra::seed::Seed;
use shopledger_infra::{AppConfig, DashboardLoader, InMemoryLedgerStore, LedgerDispatcher, NoAdvisory};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    shopledger_observability::init();

    let config = AppConfig::from_env();
    let now = Utc::now();

    let seed = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).with_context(|| format!("reading seed file {path}"))?;
            Seed::from_json(&raw).with_context(|| format!("parsing seed file {path}"))?
        }
        None => Seed::sample(now.date_naive()),
    };

    let store = Arc::new(InMemoryLedgerStore::new());
    let shop_id = ShopId::new();
    let dispatcher = LedgerDispatcher::new(store.clone(), config.credit_term_days);
    let applied = seed
        .apply(&dispatcher, shop_id, now)
        .await
        .context("applying seed requests")?;
    tracing::info!(shop_id = %shop_id, requests = applied, "shop seeded");

    let loader = DashboardLoader::new(store, NoAdvisory, config.insights);
    let dashboard = loader.load(shop_id, now).await;

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

//! External advisory (recommendation) source.
//!
//! Any failure here is non-fatal: the dashboard falls back to local
//! heuristics.

use async_trait::async_trait;
use thiserror::Error;

use shopledger_core::ShopId;
use shopledger_insights::Recommendation;

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory service unavailable")]
    Unavailable,

    #[error("advisory request failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait AdvisoryService: Send + Sync {
    async fn recommendations(&self, shop_id: ShopId) -> Result<Vec<Recommendation>, AdvisoryError>;
}

/// No advisory service configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdvisory;

#[async_trait]
impl AdvisoryService for NoAdvisory {
    async fn recommendations(&self, _shop_id: ShopId) -> Result<Vec<Recommendation>, AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }
}

/// Fixed answer for every shop.
#[derive(Debug, Clone, Default)]
pub struct StaticAdvisory {
    recommendations: Vec<Recommendation>,
}

impl StaticAdvisory {
    pub fn new(recommendations: Vec<Recommendation>) -> Self {
        Self { recommendations }
    }
}

#[async_trait]
impl AdvisoryService for StaticAdvisory {
    async fn recommendations(&self, _shop_id: ShopId) -> Result<Vec<Recommendation>, AdvisoryError> {
        Ok(self.recommendations.clone())
    }
}

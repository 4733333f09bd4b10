use thiserror::Error;

use shopledger_core::DomainError;

use crate::store::StoreError;

/// Failure of a service call: either a domain rule rejected it or the store
/// could not serve it.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::Domain(DomainError::NotFound) | ServiceError::Store(StoreError::NotFound(_))
        )
    }

    /// An unconfirmed merge or a stale proposal.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Domain(DomainError::Conflict(_)))
    }
}

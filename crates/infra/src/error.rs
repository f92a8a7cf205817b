//! Service-level error: a domain decision or an infrastructure fault.

use thiserror::Error;

use shopcart_core::DomainError;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Business-rule failure; surfaced to the caller as-is.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Persistence failure; opaque to the caller.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(e) => Some(e),
            ServiceError::Store(_) => None,
        }
    }
}

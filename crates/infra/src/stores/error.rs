use thiserror::Error;

use storekeep_core::{DomainError, ProductId};

use crate::repository::RepositoryError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a rejected catalog or ledger operation.
///
/// None of these are fatal; callers report them and carry on.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a product with id {0} already exists")]
    DuplicateId(ProductId),

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error(
        "insufficient stock for product {product_id} (requested: {requested}, available: {available})"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A persisted record decoded but does not describe a valid entry.
    #[error("stored record for product {id} is invalid: {source}")]
    InvalidRecord {
        id: ProductId,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Persisted data could not be trusted (undecodable file or invalid record).
    pub fn is_malformed_store(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidRecord { .. } | StoreError::Repository(RepositoryError::Malformed { .. })
        )
    }
}

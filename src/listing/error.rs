use thiserror::Error;

use crate::allocator::AllocationError;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Property code already exists: {0}")]
    DuplicateCode(String),

    #[error("Failed to generate property code: {0}")]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ListingError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ListingError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        ListingError::NotFound(id.into())
    }
}

macro_rules! store_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for ListingError {
                fn from(e: $source) -> Self {
                    ListingError::Store(StoreError::from(e))
                }
            }
        )*
    };
}

store_from!(
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

use thiserror::Error;

use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Lead not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LeadError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LeadError::Validation(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        LeadError::NotFound(id.into())
    }
}

macro_rules! store_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for LeadError {
                fn from(e: $source) -> Self {
                    LeadError::Store(StoreError::from(e))
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

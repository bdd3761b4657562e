use std::time::Duration;

use thiserror::Error;

/// Failure of the embedded database to complete an operation.
///
/// Callers must not assume a mutation was or was not applied when they see
/// this error: a timed-out write may still commit in the background.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation '{operation}' timed out after {}ms", .timeout.as_millis())]
    TimedOut {
        operation: &'static str,
        timeout: Duration,
    },
}

macro_rules! unavailable_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for StoreError {
                fn from(e: $source) -> Self {
                    StoreError::Unavailable(e.to_string())
                }
            }
        )*
    };
}

unavailable_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
    std::io::Error,
);

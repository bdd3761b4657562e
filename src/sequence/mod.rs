//! Per-prefix sequence counters.
//!
//! A [`SequenceStore`] maps a prefix such as `BLR-O` to the last sequence
//! number issued for it. [`SequenceStore::next_sequence`] is the only way to
//! mutate a counter and must be a single atomic upsert-and-increment on the
//! storage side: concurrent callers on one prefix each get a distinct,
//! strictly increasing value, and a never-seen prefix starts at 1.

mod redb_store;

pub use crate::storage::StoreError;
pub use redb_store::RedbSequenceStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of one counter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceCounter {
    pub prefix: String,
    /// Last sequence issued for this prefix.
    pub value: u64,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Atomically increment the counter for `prefix` and return the new
    /// value, creating it at 0 first if absent.
    async fn next_sequence(&self, prefix: &str) -> Result<u64, StoreError>;

    /// All counters, sorted by prefix.
    async fn counters(&self) -> Result<Vec<SequenceCounter>, StoreError>;

    /// The counter for `prefix`, if one has ever been issued.
    async fn current(&self, prefix: &str) -> Result<Option<SequenceCounter>, StoreError>;
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable};
use tracing::debug;

use super::{SequenceCounter, SequenceStore};
use crate::storage::tables::SEQUENCE_COUNTERS;
use crate::storage::{Storage, StoreError};

/// `SequenceStore` backed by the embedded redb database.
///
/// The read-modify-write of an increment happens inside one redb write
/// transaction. redb admits a single writer at a time, so increments on the
/// same prefix are linearizable and a first-time prefix is created and
/// incremented in the same step.
#[derive(Debug, Clone)]
pub struct RedbSequenceStore {
    storage: Storage,
}

impl RedbSequenceStore {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

fn to_counter(prefix: &str, (value, updated_ms): (u64, i64)) -> SequenceCounter {
    SequenceCounter {
        prefix: prefix.to_string(),
        value,
        updated_at: DateTime::from_timestamp_millis(updated_ms).unwrap_or_default(),
    }
}

fn increment(db: &Database, prefix: &str) -> Result<u64, StoreError> {
    let txn = db.begin_write()?;
    let next = {
        let mut table = txn.open_table(SEQUENCE_COUNTERS)?;
        let current = table.get(prefix)?.map_or(0, |guard| guard.value().0);
        let next = current.checked_add(1).ok_or_else(|| {
            StoreError::Unavailable(format!("sequence for {prefix} is exhausted"))
        })?;
        table.insert(prefix, (next, Utc::now().timestamp_millis()))?;
        next
    };
    txn.commit()?;
    Ok(next)
}

fn read_all(db: &Database) -> Result<Vec<SequenceCounter>, StoreError> {
    let txn = db.begin_read()?;
    let table = txn.open_table(SEQUENCE_COUNTERS)?;

    let mut counters = Vec::new();
    for entry in table.iter()? {
        let (key, value) = entry?;
        counters.push(to_counter(key.value(), value.value()));
    }
    Ok(counters)
}

fn read_one(db: &Database, prefix: &str) -> Result<Option<SequenceCounter>, StoreError> {
    let txn = db.begin_read()?;
    let table = txn.open_table(SEQUENCE_COUNTERS)?;
    let counter = table
        .get(prefix)?
        .map(|guard| to_counter(prefix, guard.value()));
    Ok(counter)
}

#[async_trait]
impl SequenceStore for RedbSequenceStore {
    async fn next_sequence(&self, prefix: &str) -> Result<u64, StoreError> {
        let key = prefix.to_string();
        let next = self
            .storage
            .run("next_sequence", move |db| increment(db, &key))
            .await?;
        debug!(prefix = %prefix, sequence = next, "Issued sequence");
        Ok(next)
    }

    async fn counters(&self) -> Result<Vec<SequenceCounter>, StoreError> {
        self.storage.run("counters", read_all).await
    }

    async fn current(&self, prefix: &str) -> Result<Option<SequenceCounter>, StoreError> {
        let key = prefix.to_string();
        self.storage
            .run("current_sequence", move |db| read_one(db, &key))
            .await
    }
}

//! Read-only allocation statistics for operational visibility.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::sequence::{SequenceStore, StoreError};

/// Error raised by a [`ListingCounter`] implementation.
pub type CountError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Failed to read sequence counters: {0}")]
    Counters(#[source] StoreError),

    #[error("Failed to count listings: {0}")]
    Listings(#[source] CountError),
}

/// Source of the total listing count.
#[async_trait]
pub trait ListingCounter: Send + Sync {
    async fn count_listings(&self) -> Result<u64, CountError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixStats {
    pub prefix: String,
    /// Last sequence issued, which is also the number of codes ever drawn
    /// from this prefix (including codes whose listing was never saved or
    /// was deleted).
    pub count: u64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStats {
    pub total_counters: usize,
    pub per_prefix: Vec<PrefixStats>,
    pub total_listings: u64,
}

/// Gather per-prefix counters and the listing total. Pure read.
pub async fn collect(
    store: &dyn SequenceStore,
    listings: &dyn ListingCounter,
) -> Result<AllocationStats, StatsError> {
    let mut per_prefix: Vec<PrefixStats> = store
        .counters()
        .await
        .map_err(StatsError::Counters)?
        .into_iter()
        .map(|c| PrefixStats {
            prefix: c.prefix,
            count: c.value,
            last_updated: c.updated_at,
        })
        .collect();
    per_prefix.sort_by(|a, b| a.prefix.cmp(&b.prefix));

    let total_listings = listings
        .count_listings()
        .await
        .map_err(StatsError::Listings)?;

    Ok(AllocationStats {
        total_counters: per_prefix.len(),
        per_prefix,
        total_listings,
    })
}

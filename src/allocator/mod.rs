//! Property code allocation.
//!
//! Derivation and formatting are pure; the sequence store's atomic
//! increment is the only shared-state step and the allocator takes no locks
//! of its own. Every successful call consumes a sequence number for good:
//! codes are never recycled, gaps are acceptable, duplicates are not.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::code::{is_location_code, is_type_code, prefix_for, CodeError, CodeTables, PropertyCode};
use crate::sequence::{SequenceStore, StoreError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// Blank location or type. Nothing was consumed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The atomic increment did not complete. A sequence may or may not have
    /// been consumed; retrying is safe and draws a fresh one.
    #[error("Sequence store unavailable: {0}")]
    StoreUnavailable(String),

    /// Derivation produced something that is not a valid code.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl From<StoreError> for AllocationError {
    fn from(e: StoreError) -> Self {
        AllocationError::StoreUnavailable(e.to_string())
    }
}

impl From<CodeError> for AllocationError {
    fn from(e: CodeError) -> Self {
        match e {
            CodeError::InvalidInput(msg) => AllocationError::InvalidInput(msg),
            other => AllocationError::InternalInvariant(other.to_string()),
        }
    }
}

/// Composes code derivation with a [`SequenceStore`].
#[derive(Clone)]
pub struct PropertyCodeAllocator {
    tables: Arc<CodeTables>,
    store: Arc<dyn SequenceStore>,
}

impl PropertyCodeAllocator {
    #[must_use]
    pub fn new(tables: Arc<CodeTables>, store: Arc<dyn SequenceStore>) -> Self {
        Self { tables, store }
    }

    #[must_use]
    pub fn tables(&self) -> &CodeTables {
        &self.tables
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn SequenceStore> {
        &self.store
    }

    /// Derive the `{location}-{type}` prefix without touching the store.
    ///
    /// Fails with `InternalInvariant` when a fallback code is not made of
    /// letters (e.g. a location starting with digits), before any sequence
    /// is consumed.
    pub fn derive_prefix(&self, location: &str, kind: &str) -> Result<String, AllocationError> {
        if location.trim().is_empty() {
            return Err(AllocationError::InvalidInput("location is required".to_string()));
        }
        if kind.trim().is_empty() {
            return Err(AllocationError::InvalidInput("type is required".to_string()));
        }

        let location_code = self.tables.derive_location_code(location)?;
        let type_code = self.tables.derive_type_code(kind)?;

        if !is_location_code(&location_code) || !is_type_code(&type_code) {
            let msg = format!(
                "derived prefix '{}' from location '{}' and type '{}' is not a valid code prefix",
                prefix_for(&location_code, &type_code),
                location.trim(),
                kind.trim()
            );
            error!("{msg}");
            return Err(AllocationError::InternalInvariant(msg));
        }

        Ok(prefix_for(&location_code, &type_code))
    }

    /// Allocate the next property code for a location and property type.
    pub async fn allocate(&self, location: &str, kind: &str) -> Result<PropertyCode, AllocationError> {
        let prefix = self.derive_prefix(location, kind)?;
        let (location_code, type_code) = prefix
            .split_once('-')
            .ok_or_else(|| AllocationError::InternalInvariant(format!("malformed prefix '{prefix}'")))?;

        let sequence = self.store.next_sequence(&prefix).await.map_err(|e| {
            error!(prefix = %prefix, error = %e, "Failed to get next sequence");
            AllocationError::from(e)
        })?;

        let code = PropertyCode::new(location_code, type_code, sequence).map_err(|e| {
            error!(prefix = %prefix, sequence, error = %e, "Assembled property code failed validation");
            AllocationError::InternalInvariant(e.to_string())
        })?;

        info!(
            property_code = %code,
            location = %location.trim(),
            kind = %kind.trim(),
            "Generated property code"
        );
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{RedbSequenceStore, SequenceCounter};
    use crate::storage::{Storage, DEFAULT_STORE_TIMEOUT};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn allocator() -> PropertyCodeAllocator {
        let storage = Storage::in_memory(DEFAULT_STORE_TIMEOUT).unwrap();
        PropertyCodeAllocator::new(
            Arc::new(CodeTables::default()),
            Arc::new(RedbSequenceStore::new(storage)),
        )
    }

    /// Store that counts calls and always fails.
    struct DownStore {
        calls: AtomicU64,
    }

    #[async_trait]
    impl SequenceStore for DownStore {
        async fn next_sequence(&self, _prefix: &str) -> Result<u64, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection lost".to_string()))
        }

        async fn counters(&self) -> Result<Vec<SequenceCounter>, StoreError> {
            Ok(Vec::new())
        }

        async fn current(&self, _prefix: &str) -> Result<Option<SequenceCounter>, StoreError> {
            Ok(None)
        }
    }

    /// Store that jumps straight to a large value.
    struct FixedStore(u64);

    #[async_trait]
    impl SequenceStore for FixedStore {
        async fn next_sequence(&self, _prefix: &str) -> Result<u64, StoreError> {
            Ok(self.0)
        }

        async fn counters(&self) -> Result<Vec<SequenceCounter>, StoreError> {
            Ok(Vec::new())
        }

        async fn current(&self, _prefix: &str) -> Result<Option<SequenceCounter>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_allocate_formats_first_code() {
        let allocator = allocator();
        let code = allocator.allocate("Bangalore", "Office").await.unwrap();
        assert_eq!(code.to_string(), "BLR-O-001");
    }

    #[tokio::test]
    async fn test_allocate_increments_per_prefix() {
        let allocator = allocator();
        for expected in ["MUM-R-001", "MUM-R-002", "MUM-R-003"] {
            let code = allocator.allocate("mumbai", "retail").await.unwrap();
            assert_eq!(code.to_string(), expected);
        }
        let other = allocator.allocate("Mumbai", "Office").await.unwrap();
        assert_eq!(other.to_string(), "MUM-O-001");
    }

    #[tokio::test]
    async fn test_allocate_uses_fallback_codes() {
        let allocator = allocator();
        let code = allocator.allocate("Timbuktu", "Warehouse").await.unwrap();
        assert_eq!(code.to_string(), "TIM-W-001");
    }

    #[tokio::test]
    async fn test_allocate_wide_sequence() {
        let allocator = PropertyCodeAllocator::new(Arc::new(CodeTables::default()), Arc::new(FixedStore(1523)));
        let code = allocator.allocate("Mumbai", "Retail").await.unwrap();
        assert_eq!(code.to_string(), "MUM-R-1523");
    }

    #[tokio::test]
    async fn test_blank_input_consumes_nothing() {
        let store = Arc::new(DownStore { calls: AtomicU64::new(0) });
        let shared: Arc<dyn SequenceStore> = store.clone();
        let allocator = PropertyCodeAllocator::new(Arc::new(CodeTables::default()), shared);

        assert!(matches!(
            allocator.allocate("", "Office").await,
            Err(AllocationError::InvalidInput(_))
        ));
        assert!(matches!(
            allocator.allocate("Pune", "  ").await,
            Err(AllocationError::InvalidInput(_))
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_store_unavailable() {
        let allocator = PropertyCodeAllocator::new(
            Arc::new(CodeTables::default()),
            Arc::new(DownStore { calls: AtomicU64::new(0) }),
        );
        assert!(matches!(
            allocator.allocate("Delhi", "Office").await,
            Err(AllocationError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_non_letter_fallback_is_internal_invariant_before_store() {
        let store = Arc::new(DownStore { calls: AtomicU64::new(0) });
        let shared: Arc<dyn SequenceStore> = store.clone();
        let allocator = PropertyCodeAllocator::new(Arc::new(CodeTables::default()), shared);

        assert!(matches!(
            allocator.allocate("42nd Street", "Office").await,
            Err(AllocationError::InternalInvariant(_))
        ));
        assert!(matches!(
            allocator.allocate("Pune", "1BHK").await,
            Err(AllocationError::InternalInvariant(_))
        ));
        assert!(matches!(
            allocator.allocate("X", "Office").await,
            Err(AllocationError::InternalInvariant(_))
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_derive_prefix() {
        let allocator = allocator();
        assert_eq!(allocator.derive_prefix("BANGALORE", "office").unwrap(), "BLR-O");
        assert_eq!(allocator.derive_prefix(" Kochi ", "Co-Working").unwrap(), "KOC-C");
    }
}

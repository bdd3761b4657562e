/// Trait for mapping domain errors to structured error codes and optional tips.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

const RETRY_TIP: &str = "Retry the request; a retry may leave a gap in the numbering but never a duplicate";

// ── AllocationError ────────────────────────────────────────────────────────────
impl ToStructuredError for crate::allocator::AllocationError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::allocator::AllocationError;
        match self {
            AllocationError::InvalidInput(_) => (
                "INVALID_INPUT",
                Some("Provide a non-blank location and property type"),
            ),
            AllocationError::StoreUnavailable(_) => ("STORE_UNAVAILABLE", Some(RETRY_TIP)),
            AllocationError::InternalInvariant(_) => (
                "INTERNAL_INVARIANT",
                Some("Add a mapping for this location or type under [codes] in the daemon config"),
            ),
        }
    }
}

// ── StoreError ─────────────────────────────────────────────────────────────────
impl ToStructuredError for crate::storage::StoreError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::storage::StoreError;
        match self {
            StoreError::Unavailable(_) => ("STORE_UNAVAILABLE", None),
            StoreError::TimedOut { .. } => ("STORE_TIMEOUT", None),
        }
    }
}

// ── ListingError ───────────────────────────────────────────────────────────────
impl ToStructuredError for crate::listing::ListingError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::listing::ListingError;
        match self {
            ListingError::Validation(_) => ("VALIDATION_ERROR", None),
            ListingError::NotFound(_) => ("LISTING_NOT_FOUND", None),
            ListingError::DuplicateCode(_) => ("DUPLICATE_CODE", Some(RETRY_TIP)),
            ListingError::Allocation(inner) => inner.error_code_and_tip(),
            ListingError::Store(inner) => inner.error_code_and_tip(),
            ListingError::Json(_) => ("JSON_ERROR", None),
        }
    }
}

// ── LeadError ──────────────────────────────────────────────────────────────────
impl ToStructuredError for crate::lead::LeadError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::lead::LeadError;
        match self {
            LeadError::Validation(_) => ("VALIDATION_ERROR", None),
            LeadError::NotFound(_) => ("LEAD_NOT_FOUND", None),
            LeadError::Store(inner) => inner.error_code_and_tip(),
            LeadError::Json(_) => ("JSON_ERROR", None),
        }
    }
}

// ── StatsError ─────────────────────────────────────────────────────────────────
impl ToStructuredError for crate::stats::StatsError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::stats::StatsError;
        match self {
            StatsError::Counters(inner) => inner.error_code_and_tip(),
            StatsError::Listings(_) => ("LISTING_COUNT_ERROR", None),
        }
    }
}

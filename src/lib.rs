//! Property-code allocation daemon for a commercial listings backend.
//!
//! Codes look like `BLR-O-001`: a location code, a property-type code and a
//! per-prefix sequence drawn from an atomic counter. [`allocator`] composes
//! the pure derivation in [`code`] with the counter in [`sequence`];
//! [`listing`] stores the records that carry the codes, [`lead`] captures
//! enquiries, and [`server`] exposes them over gRPC.
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod allocator;
pub mod code;
pub mod config;
pub mod cors;
pub mod grpc_logging;
pub mod lead;
pub mod listing;
pub mod logging;
pub mod metrics;
pub mod sequence;
pub mod server;
pub mod stats;
pub mod storage;

pub use allocator::{AllocationError, PropertyCodeAllocator};
pub use code::{CodeTables, PropertyCode};
pub use lead::{Lead, LeadError, LeadStore};
pub use listing::{Listing, ListingError, ListingStore};
pub use sequence::{RedbSequenceStore, SequenceStore};
pub use server::ListingsDaemonService;
pub use stats::AllocationStats;
pub use storage::{Storage, StoreError};

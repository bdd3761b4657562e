//! gRPC surface of the daemon.
//!
//! Domain failures are reported in-band: every response carries `success`
//! and a structured JSON `error` string. `Status` is reserved for transport
//! level problems.

mod convert;
pub mod error_mapping;
mod handlers;
pub mod helpers;
pub mod structured_error;
mod trait_impl;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;

use crate::allocator::PropertyCodeAllocator;
use crate::lead::LeadStore;
use crate::listing::ListingStore;

// Import generated protobuf types
pub mod proto {
    #![allow(clippy::pedantic)]
    #![allow(clippy::all)]
    #![allow(rust_2018_idioms, trivial_casts, trivial_numeric_casts, unused_qualifications)]
    tonic::include_proto!("listings");
}

/// Encoded descriptor set for gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("listings_descriptor");

/// Signal type for daemon shutdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownSignal {
    None,
    Shutdown,
}

pub struct ListingsDaemonService {
    allocator: PropertyCodeAllocator,
    listings: ListingStore,
    leads: LeadStore,
    shutdown_tx: Arc<watch::Sender<ShutdownSignal>>,
    data_path: Option<PathBuf>,
}

impl ListingsDaemonService {
    /// `data_path` is the database file, `None` when running ephemeral.
    #[must_use]
    pub fn new(
        allocator: PropertyCodeAllocator,
        listings: ListingStore,
        leads: LeadStore,
        shutdown_tx: Arc<watch::Sender<ShutdownSignal>>,
        data_path: Option<PathBuf>,
    ) -> Self {
        Self {
            allocator,
            listings,
            leads,
            shutdown_tx,
            data_path,
        }
    }
}

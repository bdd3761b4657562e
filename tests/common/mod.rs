//! Common test utilities

use std::path::Path;
use std::sync::Arc;

use listings_daemon::code::CodeTables;
use listings_daemon::lead::{
    ContactInfo, CreateLeadOptions, LeadStore, LoggingNotifier, SpaceRequirements, Workstations,
};
use listings_daemon::listing::{CreateListingOptions, ListingStore};
use listings_daemon::sequence::{RedbSequenceStore, SequenceStore};
use listings_daemon::storage::{Storage, DATABASE_FILENAME, DEFAULT_STORE_TIMEOUT};
use listings_daemon::PropertyCodeAllocator;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Everything a test needs, wired over one database.
pub struct Fixture {
    pub storage: Storage,
    pub sequences: Arc<RedbSequenceStore>,
    pub allocator: PropertyCodeAllocator,
    pub listings: ListingStore,
    pub leads: LeadStore,
}

fn wire(storage: Storage) -> Fixture {
    let sequences = Arc::new(RedbSequenceStore::new(storage.clone()));
    let shared: Arc<dyn SequenceStore> = sequences.clone();
    let allocator = PropertyCodeAllocator::new(Arc::new(CodeTables::default()), shared);
    Fixture {
        listings: ListingStore::new(storage.clone()),
        leads: LeadStore::new(storage.clone(), Arc::new(LoggingNotifier)),
        storage,
        sequences,
        allocator,
    }
}

/// Fixture over an in-memory database.
#[allow(dead_code)] // Not every test binary uses every helper
pub fn in_memory_fixture() -> Fixture {
    wire(Storage::in_memory(DEFAULT_STORE_TIMEOUT).expect("Failed to open in-memory store"))
}

/// Fixture over a database file inside `dir`.
#[allow(dead_code)]
pub fn on_disk_fixture(dir: &Path) -> Fixture {
    let path = dir.join(DATABASE_FILENAME);
    wire(Storage::open(&path, DEFAULT_STORE_TIMEOUT).expect("Failed to open store"))
}

/// A create request that passes validation.
#[allow(dead_code)]
pub fn listing_options(location: &str, kind: &str) -> CreateListingOptions {
    CreateListingOptions {
        title: format!("{kind} space in {location}"),
        kind: kind.to_string(),
        location: location.to_string(),
        area: "1,800 sq.ft".to_string(),
        price: "₹ 85,000 / month".to_string(),
        images: vec!["https://img.example/front.jpg".to_string()],
        features: vec!["24x7 access".to_string(), "Power backup".to_string()],
        views_range: None,
    }
}

/// A space calculator enquiry that passes validation.
#[allow(dead_code)]
pub fn lead_options(company: &str, persons: u32) -> CreateLeadOptions {
    let area = f64::from(persons) * 60.0;
    CreateLeadOptions {
        contact: ContactInfo {
            name: "Meera Iyer".to_string(),
            company: company.to_string(),
            designation: "Admin Head".to_string(),
            phone: "+91 99000 12345".to_string(),
            email: format!("meera@{}.example", company.to_lowercase().replace(' ', "-")),
        },
        space: Some(SpaceRequirements {
            workstations: Workstations {
                persons,
                area,
                ..Default::default()
            },
            ..Default::default()
        }),
        total_area: Some(area),
        ..Default::default()
    }
}

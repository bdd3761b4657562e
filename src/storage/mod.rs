//! Embedded database handle shared by the sequence, listing and lead stores.
//!
//! redb transactions are blocking, so every operation runs on the blocking
//! thread pool under a timeout. An operation that exceeds the timeout is
//! reported as [`StoreError::TimedOut`]; the transaction itself is not
//! cancelled and may still commit.

mod error;
pub mod tables;

pub use error::StoreError;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use redb::backends::InMemoryBackend;
use redb::Database;
use tracing::{debug, info};

/// Database filename used under the data directory.
pub const DATABASE_FILENAME: &str = "listings.redb";

/// Default timeout for a single store operation.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to the embedded database.
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
    timeout: Duration,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("timeout", &self.timeout)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Storage {
    /// Open or create the database file at `path`, creating parent
    /// directories as needed.
    pub fn open(path: &Path, timeout: Duration) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        ensure_tables(&db)?;
        info!("Opened listings database at {}", path.display());

        Ok(Self {
            db: Arc::new(db),
            timeout,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a database that lives only in process memory.
    pub fn in_memory(timeout: Duration) -> Result<Self, StoreError> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        ensure_tables(&db)?;
        debug!("Opened in-memory listings database");

        Ok(Self {
            db: Arc::new(db),
            timeout,
            path: None,
        })
    }

    /// Path of the database file, `None` for in-memory databases.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run a blocking database operation on the blocking pool, bounded by
    /// the store timeout.
    pub async fn run<T, E, F>(&self, operation: &'static str, f: F) -> Result<T, E>
    where
        F: FnOnce(&Database) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let handle = tokio::task::spawn_blocking(move || f(&db));

        match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(E::from(StoreError::Unavailable(format!(
                "{operation} worker failed: {join_err}"
            )))),
            Err(_) => Err(E::from(StoreError::TimedOut {
                operation,
                timeout: self.timeout,
            })),
        }
    }
}

fn ensure_tables(db: &Database) -> Result<(), StoreError> {
    let txn = db.begin_write()?;
    {
        txn.open_table(tables::SEQUENCE_COUNTERS)?;
        txn.open_table(tables::LISTINGS)?;
        txn.open_table(tables::LISTING_CODES)?;
        txn.open_table(tables::LEADS)?;
    }
    txn.commit()?;
    Ok(())
}

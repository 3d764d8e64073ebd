//! Storage handle
//!
//! Owns the redb database backing both tables and hands out transactions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use redb::{Database, ReadTransaction, TableDefinition, WriteTransaction};
use tracing::{debug, info, warn};

use crate::codec::IndexKey;
use crate::config::{Config, Durability};
use crate::error::{Result, StoreError};

/// Log partition: big-endian index key → framed entry value
pub(crate) const LOGS: TableDefinition<&IndexKey, &[u8]> = TableDefinition::new("logs");

/// Stable partition: arbitrary key → arbitrary value
pub(crate) const CONF: TableDefinition<&[u8], &[u8]> = TableDefinition::new("conf");

/// Shared handle to the backing database
///
/// ## Concurrency:
/// - Cloning is cheap; every clone refers to the same database
/// - Write transactions are serialized by redb (one writer at a time)
/// - Read transactions see a point-in-time snapshot and never block writers
/// - `db` lock only guards open/closed state; `close()` waits for in-flight
///   transactions to finish
/// - Shared acquisitions are recursive, so a store call made from inside a
///   snapshot closure still proceeds while `close()` is queued
#[derive(Clone)]
pub struct Storage {
    inner: Arc<Inner>,
}

struct Inner {
    /// Backing file
    path: PathBuf,

    /// Durability applied to every write transaction
    durability: Durability,

    /// Largest accepted entry payload
    max_entry_size: usize,

    /// `None` once closed
    db: RwLock<Option<Database>>,
}

impl Storage {
    /// Open or create the database at `config.path`
    ///
    /// On open:
    /// 1. Validate config and create the parent directory
    /// 2. Open/create the database file
    /// 3. Create the `logs` and `conf` tables if absent (one transaction)
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut builder = redb::Builder::new();
        if let Some(size) = config.cache_size {
            builder.set_cache_size(size);
        }
        let db = builder.create(&config.path)?;

        // On failure `db` is dropped here, releasing the file.
        Self::create_tables(&db)?;

        info!(path = %config.path.display(), durability = ?config.durability, "storage opened");

        Ok(Self {
            inner: Arc::new(Inner {
                path: config.path.clone(),
                durability: config.durability,
                max_entry_size: config.max_entry_size,
                db: RwLock::new(Some(db)),
            }),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().path(path).build();
        Self::open(&config)
    }

    fn create_tables(db: &Database) -> Result<()> {
        let txn = db.begin_write()?;
        {
            txn.open_table(LOGS)?;
            txn.open_table(CONF)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Release the backing file
    ///
    /// Returns `true` on the call that actually closed the database and
    /// `false` for every later call. Operations on any clone of this handle
    /// fail with `StoreError::Closed` afterwards.
    pub fn close(&self) -> bool {
        let mut db = self.inner.db.write();
        match db.take() {
            Some(database) => {
                drop(database);
                info!(path = %self.inner.path.display(), "storage closed");
                true
            }
            None => false,
        }
    }

    /// Whether `close()` has been called
    pub fn is_closed(&self) -> bool {
        self.inner.db.read_recursive().is_none()
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Get the maximum entry payload size
    pub fn max_entry_size(&self) -> usize {
        self.inner.max_entry_size
    }

    // =========================================================================
    // Transaction Helpers
    // =========================================================================

    /// Run `f` inside a read transaction
    pub(crate) fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ReadTransaction<'_>) -> Result<T>,
    {
        let db = self.inner.db.read_recursive();
        let db = db.as_ref().ok_or(StoreError::Closed)?;
        let txn = db.begin_read()?;
        f(&txn)
    }

    /// Run `f` inside a write transaction
    ///
    /// Commits when `f` returns `Ok`, aborts when it returns `Err`. Nothing
    /// `f` wrote is visible to other transactions until the commit succeeds.
    pub(crate) fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WriteTransaction<'_>) -> Result<T>,
    {
        let db = self.inner.db.read_recursive();
        let db = db.as_ref().ok_or(StoreError::Closed)?;

        let mut txn = db.begin_write()?;
        txn.set_durability(self.inner.durability.into());

        match f(&txn) {
            Ok(out) => {
                txn.commit()?;
                Ok(out)
            }
            Err(err) => {
                debug!(error = %err, "aborting write transaction");
                if let Err(abort_err) = txn.abort() {
                    warn!(error = %abort_err, "failed to abort write transaction");
                }
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("path", &self.inner.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}

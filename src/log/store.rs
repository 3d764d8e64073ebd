//! Durable log store
//!
//! Implements `LogStore` on top of the `logs` table.

use redb::ReadableTable;
use tracing::debug;

use crate::codec::{decode_index, encode_entry, encode_index, IndexKey};
use crate::error::{Result, StoreError};
use crate::storage::{Storage, LOGS};
use crate::traits::LogStore;

use super::snapshot::{self, LogSnapshot};
use super::LogEntry;

/// Log store backed by the shared storage handle
///
/// Every write runs in its own write transaction and is durable (per the
/// configured durability) once the call returns `Ok`.
#[derive(Clone, Debug)]
pub struct DiskLogStore {
    storage: Storage,
}

impl DiskLogStore {
    /// Create a log store over an open storage handle
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Get the underlying storage handle
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<u64> {
        self.with_snapshot(|snapshot| snapshot.len())
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Run `f` against a point-in-time view of the log
    ///
    /// Writes committed while `f` runs are not visible to it, and do not wait
    /// for it. Do not call `Storage::close()` from inside `f`.
    pub fn with_snapshot<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&LogSnapshot<'_>) -> Result<T>,
    {
        self.storage.read(|txn| {
            let snapshot = LogSnapshot::new(txn.open_table(LOGS)?);
            f(&snapshot)
        })
    }
}

impl LogStore for DiskLogStore {
    fn first_index(&self) -> Result<u64> {
        self.storage.read(|txn| snapshot::first_index(&txn.open_table(LOGS)?))
    }

    fn last_index(&self) -> Result<u64> {
        self.storage.read(|txn| snapshot::last_index(&txn.open_table(LOGS)?))
    }

    fn get_log(&self, index: u64) -> Result<LogEntry> {
        self.storage.read(|txn| snapshot::get_log(&txn.open_table(LOGS)?, index))
    }

    fn store_logs(&self, entries: &[LogEntry]) -> Result<()> {
        let limit = self.storage.max_entry_size();

        self.storage.write(|txn| {
            let mut table = txn.open_table(LOGS)?;
            for entry in entries {
                if entry.data.len() > limit {
                    return Err(StoreError::EntryTooLarge {
                        index: entry.index,
                        size: entry.data.len(),
                        limit,
                    });
                }
                let value = encode_entry(entry)?;
                table.insert(&encode_index(entry.index), value.as_slice())?;
            }
            Ok(())
        })?;

        if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
            debug!(
                first = first.index,
                last = last.index,
                count = entries.len(),
                "stored log entries"
            );
        }
        Ok(())
    }

    fn delete_range(&self, min: u64, max: u64) -> Result<()> {
        let deleted = self.storage.write(|txn| {
            let mut table = txn.open_table(LOGS)?;

            // Seek to `min`, walk forward until an index passes `max`.
            let start = encode_index(min);
            let doomed = {
                let mut keys: Vec<IndexKey> = Vec::new();
                for item in table.range::<&IndexKey>(&start..)? {
                    let (key, _) = item?;
                    if decode_index(key.value()) > max {
                        break;
                    }
                    keys.push(*key.value());
                }
                keys
            };

            for key in &doomed {
                table.remove(key)?;
            }
            Ok(doomed.len())
        })?;

        debug!(min, max, deleted, "deleted log range");
        Ok(())
    }
}

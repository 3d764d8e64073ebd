//! Read-only log views
//!
//! Lookups shared by one-shot reads and by `LogSnapshot`.

use redb::{ReadOnlyTable, ReadableTable};

use crate::codec::{decode_entry, decode_index, encode_index, IndexKey};
use crate::error::{Result, StoreError};

use super::LogEntry;

/// Point-in-time view of the log table
///
/// Obtained through `DiskLogStore::with_snapshot`.
pub struct LogSnapshot<'txn> {
    table: ReadOnlyTable<'txn, &'static IndexKey, &'static [u8]>,
}

impl<'txn> LogSnapshot<'txn> {
    pub(crate) fn new(table: ReadOnlyTable<'txn, &'static IndexKey, &'static [u8]>) -> Self {
        Self { table }
    }

    /// Smallest index in the snapshot, or 0 when empty
    pub fn first_index(&self) -> Result<u64> {
        first_index(&self.table)
    }

    /// Largest index in the snapshot, or 0 when empty
    pub fn last_index(&self) -> Result<u64> {
        last_index(&self.table)
    }

    /// Entry at `index` as of the snapshot
    pub fn get_log(&self, index: u64) -> Result<LogEntry> {
        get_log(&self.table, index)
    }

    /// Number of entries in the snapshot
    pub fn len(&self) -> Result<u64> {
        Ok(self.table.len()?)
    }

    /// Whether the snapshot holds no entries
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

// =============================================================================
// Table Lookups
// =============================================================================

pub(crate) fn first_index<T>(table: &T) -> Result<u64>
where
    T: ReadableTable<&'static IndexKey, &'static [u8]>,
{
    match table.iter()?.next() {
        Some(item) => {
            let (key, _) = item?;
            Ok(decode_index(key.value()))
        }
        None => Ok(0),
    }
}

pub(crate) fn last_index<T>(table: &T) -> Result<u64>
where
    T: ReadableTable<&'static IndexKey, &'static [u8]>,
{
    match table.iter()?.next_back() {
        Some(item) => {
            let (key, _) = item?;
            Ok(decode_index(key.value()))
        }
        None => Ok(0),
    }
}

/// The returned entry owns its bytes; nothing borrows from the transaction.
pub(crate) fn get_log<T>(table: &T, index: u64) -> Result<LogEntry>
where
    T: ReadableTable<&'static IndexKey, &'static [u8]>,
{
    match table.get(&encode_index(index))? {
        Some(value) => decode_entry(index, value.value()),
        None => Err(StoreError::LogNotFound(index)),
    }
}

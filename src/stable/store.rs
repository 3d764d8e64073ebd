//! Durable stable store
//!
//! Implements `StableStore` on top of the `conf` table.

use redb::ReadableTable;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::storage::{Storage, CONF};
use crate::traits::StableStore;

/// Stable store backed by the shared storage handle
#[derive(Clone, Debug)]
pub struct DiskStableStore {
    storage: Storage,
}

impl DiskStableStore {
    /// Create a stable store over an open storage handle
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Get the underlying storage handle
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Remove `key`; removing an absent key is not an error
    ///
    /// Returns whether the key existed.
    pub fn delete(&self, key: &[u8]) -> Result<bool> {
        let existed = self.storage.write(|txn| {
            let mut table = txn.open_table(CONF)?;
            let removed = table.remove(key)?;
            Ok(removed.is_some())
        })?;
        debug!(key_len = key.len(), existed, "deleted stable key");
        Ok(existed)
    }
}

impl StableStore for DiskStableStore {
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.storage.write(|txn| {
            let mut table = txn.open_table(CONF)?;
            table.insert(key, value)?;
            Ok(())
        })?;
        debug!(key_len = key.len(), value_len = value.len(), "set stable key");
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.storage.read(|txn| {
            let table = txn.open_table(CONF)?;
            // Copy out: the guard only lives as long as the transaction.
            let value = table.get(key)?.map(|v| v.value().to_vec());
            value.ok_or(StoreError::KeyNotFound)
        })
    }
}

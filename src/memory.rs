//! In-memory log and stable storage.
//!
//! Same contract as the disk stores without durability. Useful for tests of
//! consensus code and for nodes that run without persistence.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::log::LogEntry;
use crate::traits::{LogStore, StableStore};

/// In-memory store backed by a `BTreeMap` for logs and a `HashMap` for metadata.
pub struct MemoryStore {
    logs: RwLock<BTreeMap<u64, LogEntry>>,
    stable: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    max_entry_size: usize,
}

impl MemoryStore {
    /// Create an empty store with the given per-entry payload limit.
    pub fn new(max_entry_size: usize) -> Self {
        Self {
            logs: RwLock::new(BTreeMap::new()),
            stable: RwLock::new(HashMap::new()),
            max_entry_size,
        }
    }

    /// Number of stored log entries.
    pub fn len(&self) -> usize {
        self.logs.read().len()
    }

    /// Whether no log entries are stored.
    pub fn is_empty(&self) -> bool {
        self.logs.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(16 * 1024 * 1024)
    }
}

impl LogStore for MemoryStore {
    fn first_index(&self) -> Result<u64> {
        Ok(self.logs.read().keys().next().copied().unwrap_or(0))
    }

    fn last_index(&self) -> Result<u64> {
        Ok(self.logs.read().keys().next_back().copied().unwrap_or(0))
    }

    fn get_log(&self, index: u64) -> Result<LogEntry> {
        self.logs
            .read()
            .get(&index)
            .cloned()
            .ok_or(StoreError::LogNotFound(index))
    }

    fn store_logs(&self, entries: &[LogEntry]) -> Result<()> {
        // Validate the whole batch before touching the map.
        if let Some(entry) = entries.iter().find(|e| e.data.len() > self.max_entry_size) {
            return Err(StoreError::EntryTooLarge {
                index: entry.index,
                size: entry.data.len(),
                limit: self.max_entry_size,
            });
        }

        let mut logs = self.logs.write();
        for entry in entries {
            logs.insert(entry.index, entry.clone());
        }
        debug!(count = entries.len(), "stored log entries in memory");
        Ok(())
    }

    fn delete_range(&self, min: u64, max: u64) -> Result<()> {
        if min > max {
            return Ok(());
        }
        let mut logs = self.logs.write();
        let doomed: Vec<u64> = logs.range(min..=max).map(|(index, _)| *index).collect();
        for index in &doomed {
            logs.remove(index);
        }
        debug!(min, max, deleted = doomed.len(), "deleted in-memory log range");
        Ok(())
    }
}

impl StableStore for MemoryStore {
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.stable.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.stable
            .read()
            .get(key)
            .cloned()
            .ok_or(StoreError::KeyNotFound)
    }
}

//! Storage contracts consumed by the consensus engine.

use crate::codec::{decode_u64, encode_u64};
use crate::error::Result;
use crate::log::LogEntry;

/// Durable, ordered storage of log entries keyed by index.
///
/// Implementations must be `Send + Sync`; the consensus engine calls in from
/// whatever threads it runs on.
pub trait LogStore: Send + Sync {
    /// Smallest stored index, or 0 when empty.
    fn first_index(&self) -> Result<u64>;

    /// Largest stored index, or 0 when empty.
    fn last_index(&self) -> Result<u64>;

    /// Entry at `index`, or `StoreError::LogNotFound`.
    fn get_log(&self, index: u64) -> Result<LogEntry>;

    /// Append a single entry.
    fn store_log(&self, entry: &LogEntry) -> Result<()> {
        self.store_logs(std::slice::from_ref(entry))
    }

    /// Append a batch atomically: all entries become visible or none do.
    fn store_logs(&self, entries: &[LogEntry]) -> Result<()>;

    /// Delete every entry with `min <= index <= max`.
    fn delete_range(&self, min: u64, max: u64) -> Result<()>;
}

/// Durable key/value storage for consensus metadata (term, vote, configuration).
pub trait StableStore: Send + Sync {
    /// Insert or overwrite `key`.
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Owned copy of the value at `key`, or `StoreError::KeyNotFound`.
    fn get(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Like `set`, for `u64` values (8-byte big-endian).
    fn set_u64(&self, key: &[u8], value: u64) -> Result<()> {
        self.set(key, &encode_u64(value))
    }

    /// Like `get`, for `u64` values.
    fn get_u64(&self, key: &[u8]) -> Result<u64> {
        decode_u64(&self.get(key)?)
    }
}

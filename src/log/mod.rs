//! Log Module
//!
//! Sequentially indexed log entries persisted in the `logs` table.
//!
//! ## Responsibilities
//! - Append single entries and atomic batches
//! - Point lookup by index
//! - First/last index via ordered iteration over the index key
//! - Inclusive range deletion (log truncation and compaction)
//! - Point-in-time read snapshots

mod entry;
mod snapshot;
mod store;

pub use entry::{LogEntry, LogKind};
pub use snapshot::LogSnapshot;
pub use store::DiskLogStore;

//! Error types for raftstore
//!
//! Provides a unified error type for all storage operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for raftstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Lookup Misses (expected during normal operation)
    // -------------------------------------------------------------------------
    #[error("Log entry not found at index {0}")]
    LogNotFound(u64),

    #[error("Key not found")]
    KeyNotFound,

    // -------------------------------------------------------------------------
    // Open Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open database: {0}")]
    Open(#[from] redb::DatabaseError),

    // -------------------------------------------------------------------------
    // Transaction Errors
    // -------------------------------------------------------------------------
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Commit failed: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage backend error: {0}")]
    Backend(#[from] redb::StorageError),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Corrupted record: {0}")]
    Corruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Entry {index} is {size} bytes, exceeding the {limit} byte limit")]
    EntryTooLarge { index: u64, size: usize, limit: usize },

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Store is closed")]
    Closed,

    #[error("Invalid node state: {0}")]
    InvalidState(String),

    #[error("Consensus error: {0}")]
    Consensus(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// True for the "absent" class of errors (missing log index or stable key).
    ///
    /// Callers probing for data should treat these as a miss, not as corruption.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::LogNotFound(_) | StoreError::KeyNotFound)
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

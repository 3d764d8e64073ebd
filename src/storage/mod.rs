//! Storage Module
//!
//! Durable storage handle built on redb.
//!
//! ## Responsibilities
//! - Open the backing file once per process and create both tables
//! - Hand out read transactions (snapshot) and write transactions (serialized)
//! - Commit-or-abort around every write so partial writes are never visible
//! - Close exactly once, releasing the file handle
//!
//! ## Layout
//! ```text
//! ┌──────────────────────── raftstore.redb ────────────────────────┐
//! │  logs:  [index BE (8)] → [version | crc32 | term/kind/data]    │
//! │  conf:  [key bytes]    → [value bytes]                         │
//! └────────────────────────────────────────────────────────────────┘
//! ```

mod handle;

pub use handle::Storage;
pub(crate) use handle::{CONF, LOGS};

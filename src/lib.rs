//! # raftstore
//!
//! Durable storage for a replicated (Raft) log:
//! - Log entries keyed by index, with atomic batched appends
//! - Inclusive range deletion for log truncation and compaction
//! - Stable key/value metadata (term, vote, configuration)
//! - Crash consistency through redb's ACID transactions
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Consensus Engine                           │
//! │               (external, calls into us)                      │
//! └───────────┬─────────────────────────────────┬───────────────┘
//!             │ LogStore                        │ StableStore
//!             ▼                                 ▼
//!   ┌───────────────────┐             ┌───────────────────┐
//!   │   DiskLogStore    │             │  DiskStableStore  │
//!   │  (logs table)     │             │   (conf table)    │
//!   └─────────┬─────────┘             └─────────┬─────────┘
//!             └────────────────┬────────────────┘
//!                              ▼
//!                     ┌─────────────────┐
//!                     │     Storage     │
//!                     │  (redb handle)  │
//!                     └─────────────────┘
//! ```
//!
//! `Node` owns the consensus handle and the storage handle and is the single
//! point of shutdown.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod storage;
pub mod log;
pub mod stable;
pub mod memory;
pub mod node;
pub mod traits;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, Durability};
pub use log::{DiskLogStore, LogEntry, LogKind, LogSnapshot};
pub use memory::MemoryStore;
pub use node::{Consensus, Node, NodeState};
pub use stable::DiskStableStore;
pub use storage::Storage;
pub use traits::{LogStore, StableStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of raftstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

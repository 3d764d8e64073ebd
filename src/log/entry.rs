//! Log entry definitions

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single entry in the replicated log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Position in the log, assigned by the consensus engine
    pub index: u64,

    /// Election term in which the entry was created
    pub term: u64,

    /// What the entry carries
    pub kind: LogKind,

    /// Opaque payload
    pub data: Bytes,
}

/// Kinds of log entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogKind {
    /// Command for the replicated state machine
    #[default]
    Command,

    /// Leader no-op used to commit entries from earlier terms
    Noop,

    /// Cluster membership change
    Configuration,

    /// Marker that all preceding entries have been applied
    Barrier,
}

impl LogEntry {
    /// Create a command entry
    pub fn new(index: u64, term: u64, data: impl Into<Bytes>) -> Self {
        Self {
            index,
            term,
            kind: LogKind::Command,
            data: data.into(),
        }
    }

    /// Replace the entry kind
    pub fn with_kind(mut self, kind: LogKind) -> Self {
        self.kind = kind;
        self
    }
}

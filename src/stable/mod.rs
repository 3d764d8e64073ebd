//! Stable Module
//!
//! Metadata key/value pairs (current term, vote, cluster configuration)
//! persisted in the `conf` table, independent of the log.

mod store;

pub use store::DiskStableStore;

/// Well-known keys written by the consensus engine
pub mod keys {
    /// Current election term (`u64`)
    pub const CURRENT_TERM: &[u8] = b"CurrentTerm";

    /// Candidate voted for in the current term
    pub const LAST_VOTE_CAND: &[u8] = b"LastVoteCand";

    /// Term of the last vote cast (`u64`)
    pub const LAST_VOTE_TERM: &[u8] = b"LastVoteTerm";
}

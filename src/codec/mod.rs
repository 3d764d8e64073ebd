//! Codec Module
//!
//! Byte encodings shared by the log and stable tables.
//!
//! ## Responsibilities
//! - Map a `u64` log index to an order-preserving fixed-width key
//! - Frame a log entry for storage with a version byte and CRC32 checksum
//!
//! ## Entry Value Format
//! ```text
//! ┌─────────────┬──────────┬───────────────────────────────┐
//! │ Version (1) │ CRC (4)  │ Body (bincode term/kind/data) │
//! └─────────────┴──────────┴───────────────────────────────┘
//! ```

pub mod key;
pub mod entry;

pub use key::{decode_index, decode_u64, encode_index, encode_u64, IndexKey, KEY_SIZE};
pub use entry::{decode_entry, encode_entry, ENTRY_HEADER_SIZE, ENTRY_VERSION};

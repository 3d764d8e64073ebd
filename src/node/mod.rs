//! Node Module
//!
//! Lifecycle wrapper owning the consensus handle and the storage handle.
//!
//! ## State Machine
//! ```text
//!   Created ──open()──▶ Open ──shutdown()──▶ Closed
//!      │                                        ▲
//!      └──────────────shutdown()────────────────┘
//! ```
//! - `open()` failure leaves the node in `Created` with no resources held
//! - `shutdown()` on a closed node is a no-op

mod lifecycle;

pub use lifecycle::{Consensus, Node, NodeState};

//! Node lifecycle
//!
//! All node bookkeeping lives behind one `RwLock`. The lock protects the
//! node's own state only; access to stored data is isolated by the engine's
//! transactions.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::storage::Storage;

/// Handle to the external consensus engine
///
/// The engine reaches storage through `DiskLogStore` / `DiskStableStore`
/// built from the `Storage` passed to its constructor.
pub trait Consensus: Send + Sync {
    /// Stop the engine. Called once, before storage is closed.
    fn shutdown(&self) -> Result<()>;
}

/// Observable lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Created,
    Open,
    Closed,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Created => write!(f, "created"),
            NodeState::Open => write!(f, "open"),
            NodeState::Closed => write!(f, "closed"),
        }
    }
}

/// State plus the resources that only exist while open
enum Lifecycle<C> {
    Created,
    Open { consensus: C, storage: Storage },
    Closed,
}

impl<C> Lifecycle<C> {
    fn state(&self) -> NodeState {
        match self {
            Lifecycle::Created => NodeState::Created,
            Lifecycle::Open { .. } => NodeState::Open,
            Lifecycle::Closed => NodeState::Closed,
        }
    }
}

struct NodeInner<C> {
    lifecycle: Lifecycle<C>,

    /// Peer id → address
    peers: HashMap<String, String>,
}

/// A single replicated-log server node
pub struct Node<C: Consensus> {
    config: Config,
    inner: RwLock<NodeInner<C>>,
}

impl<C: Consensus> Node<C> {
    /// Create a node in the `Created` state; nothing is opened yet
    pub fn new(config: Config) -> Self {
        Self {
            config,
            inner: RwLock::new(NodeInner {
                lifecycle: Lifecycle::Created,
                peers: HashMap::new(),
            }),
        }
    }

    /// Open storage and start the consensus engine
    ///
    /// `start` receives the opened storage handle and builds the consensus
    /// engine on top of it. If either step fails the storage is closed again,
    /// the node stays `Created`, and the error is returned.
    ///
    /// The node lock is not held while `start` runs, so `start` may call back
    /// into the node. If another `open` or `shutdown` wins in the meantime,
    /// the freshly built engine is shut down and `InvalidState` is returned.
    pub fn open<F>(&self, start: F) -> Result<()>
    where
        F: FnOnce(&Storage) -> Result<C>,
    {
        self.ensure_created()?;

        let storage = Storage::open(&self.config)?;
        let consensus = match start(&storage) {
            Ok(consensus) => consensus,
            Err(err) => {
                warn!(error = %err, "consensus failed to start, releasing storage");
                storage.close();
                return Err(err);
            }
        };

        let mut inner = self.inner.write();
        if !matches!(inner.lifecycle, Lifecycle::Created) {
            let state = inner.lifecycle.state();
            drop(inner);
            if let Err(err) = consensus.shutdown() {
                warn!(error = %err, "failed to stop consensus after losing open race");
            }
            storage.close();
            return Err(StoreError::InvalidState(format!(
                "node became {} while opening",
                state
            )));
        }

        inner.lifecycle = Lifecycle::Open { consensus, storage };
        info!(addr = %self.config.bind_addr, "node open");
        Ok(())
    }

    fn ensure_created(&self) -> Result<()> {
        let inner = self.inner.read();
        if !matches!(inner.lifecycle, Lifecycle::Created) {
            return Err(StoreError::InvalidState(format!(
                "cannot open a node that is {}",
                inner.lifecycle.state()
            )));
        }
        Ok(())
    }

    /// Shut down consensus, then close storage
    ///
    /// The node ends `Closed` even when the consensus shutdown reports an
    /// error; that error is returned after storage has been closed.
    pub fn shutdown(&self) -> Result<()> {
        let mut inner = self.inner.write();
        let previous = std::mem::replace(&mut inner.lifecycle, Lifecycle::Closed);

        match previous {
            Lifecycle::Open { consensus, storage } => {
                let result = consensus.shutdown();
                if let Err(err) = &result {
                    warn!(error = %err, "consensus shutdown failed");
                }
                storage.close();
                inner.peers.clear();
                info!(addr = %self.config.bind_addr, "node closed");
                result
            }
            Lifecycle::Created => {
                info!(addr = %self.config.bind_addr, "node closed before opening");
                Ok(())
            }
            Lifecycle::Closed => Ok(()),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> NodeState {
        self.inner.read().lifecycle.state()
    }

    /// Whether `shutdown()` has completed
    pub fn is_closed(&self) -> bool {
        self.state() == NodeState::Closed
    }

    /// Storage handle while open
    pub fn storage(&self) -> Option<Storage> {
        match &self.inner.read().lifecycle {
            Lifecycle::Open { storage, .. } => Some(storage.clone()),
            _ => None,
        }
    }

    /// Run `f` against the consensus handle while open
    pub fn with_consensus<T>(&self, f: impl FnOnce(&C) -> T) -> Option<T> {
        match &self.inner.read().lifecycle {
            Lifecycle::Open { consensus, .. } => Some(f(consensus)),
            _ => None,
        }
    }

    /// Address this node advertises
    pub fn addr(&self) -> &str {
        &self.config.bind_addr
    }

    // =========================================================================
    // Peer Bookkeeping
    // =========================================================================

    /// Record or update a peer's address
    ///
    /// Returns the previous address, if any.
    pub fn add_peer(
        &self,
        id: impl Into<String>,
        addr: impl Into<String>,
    ) -> Result<Option<String>> {
        let mut inner = self.inner.write();
        if matches!(inner.lifecycle, Lifecycle::Closed) {
            return Err(StoreError::InvalidState("node is closed".to_string()));
        }
        Ok(inner.peers.insert(id.into(), addr.into()))
    }

    /// Forget a peer; returns its address if it was known
    pub fn remove_peer(&self, id: &str) -> Option<String> {
        self.inner.write().peers.remove(id)
    }

    /// Snapshot of known peers as `(id, addr)` pairs, sorted by id
    pub fn peers(&self) -> Vec<(String, String)> {
        let mut peers: Vec<_> = self
            .inner
            .read()
            .peers
            .iter()
            .map(|(id, addr)| (id.clone(), addr.clone()))
            .collect();
        peers.sort();
        peers
    }
}

impl<C: Consensus> Drop for Node<C> {
    fn drop(&mut self) {
        if self.state() != NodeState::Open {
            return;
        }
        if let Err(err) = self.shutdown() {
            warn!(error = %err, "error shutting down node on drop");
        }
    }
}

//! Consistent-Hash Ring
//!
//! Maps cache keys and node identities onto a shared 32-bit hash space.
//! Every member expands into a fixed number of virtual points; a key is
//! owned by the first point past its hash position, wrapping from the top
//! of the space back to zero. Membership changes therefore remap only the
//! keys whose nearest point moved, which is what lets backends come and go
//! without reshuffling the whole key space.

mod hash;
mod state;

use std::sync::{Arc, RwLock};

use thiserror::Error;

use state::RingState;

/// Ring lookup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    /// Lookup attempted while no node is a member.
    #[error("empty ring: no members to resolve against")]
    EmptyRing,
}

/// Shared consistent-hash ring.
///
/// Cloning is cheap and every clone addresses the same state. Mutations
/// (`add`, `remove`, `set`) take the write lock and land as one unit;
/// `get` and `members` take the read lock, so concurrent lookups proceed
/// in parallel without ever observing a half-applied mutation. Readers
/// always receive copies, never references into the ring's own storage.
#[derive(Debug, Clone)]
pub struct Ring {
    inner: Arc<RwLock<RingState>>,
}

impl Ring {
    /// Create an empty ring generating `replicas` virtual points per node.
    ///
    /// The replica count is fixed for the ring's lifetime.
    pub fn new(replicas: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RingState::new(replicas))),
        }
    }

    /// Insert a node and its virtual points.
    pub fn add(&self, node: &str) {
        self.inner.write().unwrap().add(node);
    }

    /// Remove a node and its virtual points. No-op when absent.
    pub fn remove(&self, node: &str) {
        self.inner.write().unwrap().remove(node);
    }

    /// Reconcile membership to exactly `nodes` in one locked step.
    pub fn set<S: AsRef<str>>(&self, nodes: &[S]) {
        let nodes: Vec<String> = nodes.iter().map(|n| n.as_ref().to_string()).collect();
        self.inner.write().unwrap().set(&nodes);
    }

    /// Resolve the node owning `key`.
    ///
    /// For a fixed membership this is a pure function of the key: repeated
    /// calls always return the same node.
    pub fn get(&self, key: &str) -> Result<String, RingError> {
        self.inner.read().unwrap().resolve(key)
    }

    /// Snapshot of current member identities. Order is not meaningful.
    pub fn members(&self) -> Vec<String> {
        self.inner.read().unwrap().members()
    }

    /// Whether `node` is currently a member.
    pub fn contains(&self, node: &str) -> bool {
        self.inner.read().unwrap().contains(node)
    }

    /// Number of member nodes.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().member_count()
    }

    /// True when no node is a member.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured virtual points per node.
    pub fn replicas(&self) -> usize {
        self.inner.read().unwrap().replicas()
    }

    /// Total virtual points currently on the ring.
    pub fn point_count(&self) -> usize {
        self.inner.read().unwrap().point_count()
    }
}

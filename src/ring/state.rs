//! Ring Membership State
//!
//! Plain data model for the hash ring: the circle of virtual points, the
//! member set, and the ordered point index. Carries no synchronization of
//! its own; [`Ring`](super::Ring) wraps it in a lock, which keeps these
//! sequential semantics testable without threads.

use hashbrown::{HashMap, HashSet};

use super::hash::{position, replica_key};
use super::RingError;

#[derive(Debug)]
pub(super) struct RingState {
    /// Virtual points: ring position -> owning node. Two replica keys can
    /// collide on one position; the later insert wins and the earlier node
    /// runs one point short. Latent fairness skew at low replica counts.
    circle: HashMap<u32, String>,
    /// Current member identities.
    members: HashSet<String>,
    /// Ascending positions of every point in `circle`, rebuilt after every
    /// membership mutation.
    sorted_hashes: Vec<u32>,
    /// Virtual points generated per node, fixed at construction.
    replicas: usize,
}

impl RingState {
    pub(super) fn new(replicas: usize) -> Self {
        debug_assert!(replicas > 0);
        Self {
            circle: HashMap::new(),
            members: HashSet::new(),
            sorted_hashes: Vec::new(),
            replicas,
        }
    }

    /// Insert a node and its virtual points.
    ///
    /// Re-adding a present node rewrites the same points with identical
    /// values; wasted work, never corruption.
    pub(super) fn add(&mut self, node: &str) {
        for i in 0..self.replicas {
            self.circle
                .insert(position(&replica_key(i, node)), node.to_string());
        }
        self.members.insert(node.to_string());
        self.update_sorted_hashes();
    }

    /// Remove a node and the same virtual points `add` created. No-op when
    /// the node is not a member.
    pub(super) fn remove(&mut self, node: &str) {
        for i in 0..self.replicas {
            self.circle.remove(&position(&replica_key(i, node)));
        }
        self.members.remove(node);
        self.update_sorted_hashes();
    }

    /// Reconcile membership to exactly `nodes`: current members not listed
    /// are removed, listed nodes not present are added.
    pub(super) fn set(&mut self, nodes: &[String]) {
        let stale: Vec<String> = self
            .members
            .iter()
            .filter(|m| !nodes.contains(*m))
            .cloned()
            .collect();
        for node in stale {
            self.remove(&node);
        }
        for node in nodes {
            if !self.members.contains(node.as_str()) {
                self.add(node);
            }
        }
    }

    /// Resolve the node owning `key`: the first point strictly past the
    /// key's position, wrapping past the top of the space back to the
    /// smallest point.
    pub(super) fn resolve(&self, key: &str) -> Result<String, RingError> {
        if self.circle.is_empty() {
            return Err(RingError::EmptyRing);
        }
        let pos = position(key);
        let idx = self.sorted_hashes.partition_point(|&p| p <= pos);
        let point = if idx == self.sorted_hashes.len() {
            self.sorted_hashes[0]
        } else {
            self.sorted_hashes[idx]
        };
        Ok(self.circle[&point].clone())
    }

    /// Snapshot of the member identities.
    pub(super) fn members(&self) -> Vec<String> {
        self.members.iter().cloned().collect()
    }

    pub(super) fn contains(&self, node: &str) -> bool {
        self.members.contains(node)
    }

    pub(super) fn member_count(&self) -> usize {
        self.members.len()
    }

    pub(super) fn point_count(&self) -> usize {
        self.circle.len()
    }

    pub(super) fn replicas(&self) -> usize {
        self.replicas
    }

    /// Rebuild the ordered point index from `circle`.
    ///
    /// The backing allocation is reused across rebuilds and released once
    /// capacity headroom shows the ring has shrunk well below its previous
    /// high-water mark.
    fn update_sorted_hashes(&mut self) {
        if self.sorted_hashes.capacity() / (self.replicas * 4) > self.circle.len() {
            self.sorted_hashes = Vec::new();
        }
        self.sorted_hashes.clear();
        self.sorted_hashes.extend(self.circle.keys().copied());
        self.sorted_hashes.sort_unstable();
    }
}

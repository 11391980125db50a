//! The consistent-hash router facade.
//!
//! [`HashRouter`] owns the membership table, the position index, and the
//! ring behind one reader/writer lock and keeps the three mutually
//! consistent across every mutation.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::RouterError;
use crate::hash::{hash_key, vnode_position};
use crate::ring::Ring;

/// Virtual nodes per unit of weight used by [`HashRouter::default`].
pub const DEFAULT_VIRTUAL_NUMBER: usize = 10;

/// Weighted consistent-hash router.
///
/// Keys are mapped onto member nodes by hashing them onto a 32-bit circle
/// of virtual-node positions; each member holds `virtual_number × weight`
/// positions, so its share of the keyspace scales with declared weight.
/// Adding or removing a member only remaps the keys adjacent to its own
/// positions.
///
/// Two distinct virtual-node labels may collide on the same 32-bit
/// position. The position index keeps the last writer, so a collision
/// silently costs one of the two virtual nodes its distinct identity; the
/// ring may hold the duplicate position until the next rebuild.
///
/// All operations take `&self`: the internal state sits behind one
/// reader/writer lock, so any number of lookups run concurrently while
/// mutations are exclusive and never observable half-done.
pub struct HashRouter {
    /// Virtual nodes per unit of weight for this instance.
    virtual_number: usize,
    state: RwLock<RouterState>,
}

/// The three interdependent tables, behind one lock so the joint
/// invariant (every ring position has an owner, every owner is a member)
/// can never be observed half-updated.
#[derive(Debug)]
struct RouterState {
    /// Node id → declared weight. Source of truth for membership.
    members: HashMap<String, u32>,
    /// Virtual-node position → owning node id.
    owners: HashMap<u32, String>,
    /// Sorted virtual-node positions.
    ring: Ring,
}

impl HashRouter {
    /// Create a router placing `virtual_number` virtual nodes per unit of
    /// weight.
    ///
    /// `virtual_number` must be at least 1 for the ring to hold any
    /// positions.
    pub fn new(virtual_number: usize) -> Self {
        Self {
            virtual_number,
            state: RwLock::new(RouterState {
                members: HashMap::new(),
                owners: HashMap::new(),
                ring: Ring::new(virtual_number),
            }),
        }
    }

    /// Add a member with the given weight.
    ///
    /// Places `virtual_number × weight` virtual nodes on the ring. Keys
    /// hashing into the newly claimed arcs move to `node_id`; every other
    /// assignment is unchanged.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidWeight`] if `weight < 1`,
    /// [`RouterError::NodeAlreadyExists`] if `node_id` is already a
    /// member. A rejected call leaves the router untouched.
    pub fn add(&self, node_id: &str, weight: i32) -> Result<(), RouterError> {
        if weight < 1 {
            return Err(RouterError::InvalidWeight(weight));
        }

        let mut state = self.state.write().expect("lock poisoned");
        if state.members.contains_key(node_id) {
            return Err(RouterError::NodeAlreadyExists(node_id.to_string()));
        }
        state.members.insert(node_id.to_string(), weight as u32);

        let replicas = self.virtual_number * weight as usize;
        for index in 0..replicas {
            let position = vnode_position(node_id, index);
            state.owners.insert(position, node_id.to_string());
            state.ring.insert(position);
        }
        state.ring.sort();

        debug!(node_id, weight, replicas, "added node to ring");
        Ok(())
    }

    /// Node currently owning `key`, or `None` while no nodes are
    /// registered.
    ///
    /// Deterministic: the same key maps to the same node until membership
    /// changes. Never fails; an empty ring is a valid state, not an
    /// error.
    pub fn get(&self, key: &str) -> Option<String> {
        let state = self.state.read().expect("lock poisoned");
        let position = state.ring.successor(hash_key(key.as_bytes()))?;
        state.owners.get(&position).cloned()
    }

    /// Remove a member, reassigning its keys to the ring-adjacent
    /// survivors.
    ///
    /// Rebuilds the ring from the surviving position-index entries, which
    /// is O(total virtual nodes) — fine for tens to low hundreds of
    /// members, a ceiling beyond that.
    ///
    /// # Errors
    ///
    /// [`RouterError::NodeNotFound`] if `node_id` is not a member. A
    /// rejected call leaves the router untouched.
    pub fn remove(&self, node_id: &str) -> Result<(), RouterError> {
        let mut state = self.state.write().expect("lock poisoned");
        let RouterState {
            members,
            owners,
            ring,
        } = &mut *state;

        if members.remove(node_id).is_none() {
            return Err(RouterError::NodeNotFound(node_id.to_string()));
        }
        owners.retain(|_, owner| owner.as_str() != node_id);

        ring.clear();
        for &position in owners.keys() {
            ring.insert(position);
        }
        ring.sort();

        debug!(node_id, remaining = members.len(), "removed node from ring");
        Ok(())
    }

    /// Number of member nodes.
    pub fn node_count(&self) -> usize {
        self.state.read().expect("lock poisoned").members.len()
    }

    /// True while no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Number of positions currently on the ring, duplicates included.
    pub fn vnode_count(&self) -> usize {
        self.state.read().expect("lock poisoned").ring.len()
    }

    /// Snapshot of all member ids, in no particular order.
    pub fn node_ids(&self) -> Vec<String> {
        self.state
            .read()
            .expect("lock poisoned")
            .members
            .keys()
            .cloned()
            .collect()
    }

    /// Declared weight of a member, if present.
    pub fn weight_of(&self, node_id: &str) -> Option<u32> {
        self.state
            .read()
            .expect("lock poisoned")
            .members
            .get(node_id)
            .copied()
    }

    /// Virtual nodes per unit of weight for this instance.
    pub fn virtual_number(&self) -> usize {
        self.virtual_number
    }
}

impl Default for HashRouter {
    /// Router with [`DEFAULT_VIRTUAL_NUMBER`] virtual nodes per unit of
    /// weight.
    fn default() -> Self {
        Self::new(DEFAULT_VIRTUAL_NUMBER)
    }
}

impl std::fmt::Debug for HashRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRouter")
            .field("virtual_number", &self.virtual_number)
            .finish_non_exhaustive()
    }
}

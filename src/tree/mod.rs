//! Red-black tree map.
//!
//! [`RbTree`] owns every node through an arena; parent links are plain
//! indices, so rotations are index updates and no node is ever aliased.
//! The rebalancing follows the top-down style with direction-generic
//! single/double rotations: insertion repairs red violations on the way back
//! up the descent, deletion repairs black-height deficits the same way.

mod insert;
mod iter;
mod node;
mod remove;
mod rotate;
mod traverse;
mod validate;


use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, error};

use crate::config::TreeConfig;

use node::{Arena, Color, Direction, NodeId};

pub use insert::InsertOutcome;
pub use iter::{Cursor, CursorMut, IntoIter, Iter, Keys, Values};
pub use traverse::{Order, Traversal};
pub use validate::ValidationError;

/// Ordered map with unique keys and O(log n) worst-case height.
#[derive(Clone)]
pub struct RbTree<K, V> {
    arena: Arena<K, V>,
    check_invariants: bool,
}

impl<K, V> RbTree<K, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::with_config(&TreeConfig::default())
    }

    /// Create an empty tree with room for `capacity` nodes before the arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(&TreeConfig {
            initial_capacity: capacity,
            ..TreeConfig::default()
        })
    }

    /// Create an empty tree from a loaded configuration.
    pub fn with_config(config: &TreeConfig) -> Self {
        Self {
            arena: Arena::with_capacity(config.initial_capacity),
            check_invariants: config.check_invariants,
        }
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.arena.len()
    }

    /// Alias of [`RbTree::size`].
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.root.is_none()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        debug!(size = self.size(), "clearing tree");
        self.arena.clear();
    }

    /// Smallest entry.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.arena.first().map(|id| self.entry(id))
    }

    /// Largest entry.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.arena.last().map(|id| self.entry(id))
    }

    fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = self.arena.node(id);
        (&node.key, &node.value)
    }

    /// The root must be black once a mutation completes.
    fn blacken_root(&mut self) {
        if let Some(root) = self.arena.root {
            self.arena.set_color(root, Color::Black);
        }
    }
}

impl<K: Ord, V> RbTree<K, V> {
    /// Look up the value stored under `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(|id| &self.arena.node(id).value)
    }

    /// Mutable access to the value stored under `key`. The key itself stays fixed.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.search(key)?;
        Some(&mut self.arena.node_mut(id).value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Plain BST descent; never rebalances.
    fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.arena.root;
        while let Some(id) = current {
            let node = self.arena.node(id);
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.child(Direction::Left),
                Ordering::Greater => node.child(Direction::Right),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Runs the validator after a mutation when the tree was configured to.
    fn check_after(&self, operation: &'static str) {
        if !self.check_invariants {
            return;
        }
        if let Err(e) = self.validate() {
            error!(operation, error = %e, "red-black invariant violated");
            panic!("red-black invariant violated after {operation}: {e}");
        }
    }
}

impl<K, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RbTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for RbTree<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for RbTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbTree<K, V> {
    /// Later duplicates overwrite earlier values.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_or_update(key, value);
        }
    }
}

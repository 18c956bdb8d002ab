//! Insertion walk and its red-violation fixup.

use std::cmp::Ordering;

use tracing::trace;

use super::node::{Color, Direction, Node, NodeId};
use super::RbTree;

/// Result of an insertion attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The key was new; a node was created.
    Inserted,
    /// The key existed and its value was overwritten in place.
    Updated,
    /// The key existed and strict insertion left the tree unchanged.
    Failed,
}

impl InsertOutcome {
    pub fn is_inserted(self) -> bool {
        self == InsertOutcome::Inserted
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum OnDuplicate {
    Fail,
    Update,
}

/// An entry on its way into the tree. Owned entries move in; borrowed ones
/// are cloned only once the walk knows a node or value gets written.
trait Incoming<K, V> {
    fn key(&self) -> &K;
    fn into_entry(self) -> (K, V);
    fn update(self, slot: &mut V);
}

impl<K, V> Incoming<K, V> for (K, V) {
    fn key(&self) -> &K {
        &self.0
    }

    fn into_entry(self) -> (K, V) {
        self
    }

    fn update(self, slot: &mut V) {
        *slot = self.1;
    }
}

impl<K: Clone, V: Clone> Incoming<K, V> for (&K, &V) {
    fn key(&self) -> &K {
        self.0
    }

    fn into_entry(self) -> (K, V) {
        (self.0.clone(), self.1.clone())
    }

    fn update(self, slot: &mut V) {
        slot.clone_from(self.1);
    }
}

impl<K: Ord, V> RbTree<K, V> {
    /// Insert a new key. Fails without touching the tree if the key exists.
    pub fn insert(&mut self, key: K, value: V) -> InsertOutcome {
        self.insert_with((key, value), OnDuplicate::Fail)
    }

    /// Insert a new key, or overwrite the value of an existing one.
    pub fn insert_or_update(&mut self, key: K, value: V) -> InsertOutcome {
        self.insert_with((key, value), OnDuplicate::Update)
    }

    /// [`RbTree::insert`] from borrowed inputs; clones only what gets stored.
    pub fn insert_cloned(&mut self, key: &K, value: &V) -> InsertOutcome
    where
        K: Clone,
        V: Clone,
    {
        self.insert_with((key, value), OnDuplicate::Fail)
    }

    /// [`RbTree::insert_or_update`] from borrowed inputs.
    pub fn insert_or_update_cloned(&mut self, key: &K, value: &V) -> InsertOutcome
    where
        K: Clone,
        V: Clone,
    {
        self.insert_with((key, value), OnDuplicate::Update)
    }

    fn insert_with<E>(&mut self, entry: E, on_duplicate: OnDuplicate) -> InsertOutcome
    where
        E: Incoming<K, V>,
    {
        let outcome = match self.arena.root {
            None => {
                let (key, value) = entry.into_entry();
                let id = self.arena.alloc(Node::new(None, key, value));
                self.arena.root = Some(id);
                InsertOutcome::Inserted
            }
            Some(root) => self.insert_below(root, entry, on_duplicate),
        };
        if outcome.is_inserted() {
            self.blacken_root();
            self.check_after("insert");
        }
        outcome
    }

    /// Recursive descent from `id`. Every ancestor of a freshly created node
    /// runs the fixup for the side the new node came up from.
    fn insert_below<E>(
        &mut self,
        id: NodeId,
        entry: E,
        on_duplicate: OnDuplicate,
    ) -> InsertOutcome
    where
        E: Incoming<K, V>,
    {
        let dir = match entry.key().cmp(&self.arena.node(id).key) {
            Ordering::Less => Direction::Left,
            Ordering::Greater => Direction::Right,
            Ordering::Equal => {
                return match on_duplicate {
                    OnDuplicate::Update => {
                        entry.update(&mut self.arena.node_mut(id).value);
                        InsertOutcome::Updated
                    }
                    OnDuplicate::Fail => InsertOutcome::Failed,
                };
            }
        };

        let outcome = match self.arena.child(id, dir) {
            Some(child) => self.insert_below(child, entry, on_duplicate),
            None => {
                let (key, value) = entry.into_entry();
                let leaf = self.arena.alloc(Node::new(Some(id), key, value));
                self.arena.node_mut(id).set_child(dir, Some(leaf));
                InsertOutcome::Inserted
            }
        };

        if outcome.is_inserted() {
            self.insert_fixup(id, dir);
        }
        outcome
    }

    /// Repairs a red child on the `dir` side of `root`.
    fn insert_fixup(&mut self, root: NodeId, dir: Direction) {
        let odir = dir.opposite();
        let Some(child) = self.arena.child(root, dir) else {
            return;
        };
        if !self.arena.node(child).is_red() {
            return;
        }

        let sibling = self.arena.child(root, odir);
        if self.arena.is_red(sibling) {
            // Both children red: push the violation one level up.
            trace!(root = root.0, "insert fixup: color flip");
            self.arena.set_color(root, Color::Red);
            self.arena.set_color(child, Color::Black);
            if let Some(sibling) = sibling {
                self.arena.set_color(sibling, Color::Black);
            }
        } else if self.arena.is_red(self.arena.child(child, dir)) {
            self.arena.single_rotation(root, odir);
        } else if self.arena.is_red(self.arena.child(child, odir)) {
            self.arena.double_rotation(root, odir);
        }
    }
}

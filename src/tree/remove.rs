//! Deletion walk and its black-height fixup.
//!
//! A single recursive descent finds the node to delete. A node with two
//! children is not excised itself: the walk continues to the maximum of its
//! left subtree, excises that node, and moves its entry into the target.
//! Each level reports back whether the subtree it rooted lost black height.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

use tracing::{debug, trace};

use super::node::{Color, Direction, NodeId};
use super::RbTree;

/// Whether a subtree still needs repairing after a removal beneath it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Rebalance {
    Done,
    NeedsFixup,
}

/// What the descent is looking for.
enum Target<'q, Q: ?Sized> {
    Key(&'q Q),
    /// Right-most node of the current subtree (the in-order predecessor of
    /// the two-children node that started this leg of the descent).
    Max,
}

impl<Q: ?Sized> Clone for Target<'_, Q> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q: ?Sized> Copy for Target<'_, Q> {}

impl<K: Ord, V> RbTree<K, V> {
    /// Remove `key`, returning the value that was stored under it.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let root = self.arena.root?;
        let (removed, _) = self.remove_below(root, Target::Key(key));
        if removed.is_some() {
            self.blacken_root();
            self.check_after("remove");
        }
        removed
    }

    fn remove_below<Q>(&mut self, id: NodeId, target: Target<'_, Q>) -> (Option<(K, V)>, Rebalance)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.arena.node(id);
        let step = match target {
            Target::Key(key) => match key.cmp(node.key.borrow()) {
                Ordering::Less => Some(Direction::Left),
                Ordering::Greater => Some(Direction::Right),
                Ordering::Equal => None,
            },
            Target::Max => node.right().map(|_| Direction::Right),
        };

        let (dir, target, substitute) = match step {
            Some(dir) => (dir, target, false),
            None if node.left().is_none() || node.right().is_none() => {
                let (entry, rebalance) = self.excise(id);
                return (Some(entry), rebalance);
            }
            // Two children: delete the predecessor instead and move its
            // entry up into this node.
            None => (Direction::Left, Target::Max, true),
        };

        let Some(child) = self.arena.child(id, dir) else {
            // Fell off the tree: the key is not present.
            return (None, Rebalance::Done);
        };
        let (removed, mut rebalance) = self.remove_below(child, target);

        let removed = match (removed, substitute) {
            (Some((pred_key, pred_value)), true) => {
                let node = self.arena.node_mut(id);
                let key = mem::replace(&mut node.key, pred_key);
                let value = mem::replace(&mut node.value, pred_value);
                Some((key, value))
            }
            (removed, _) => removed,
        };

        if rebalance == Rebalance::NeedsFixup {
            rebalance = self.remove_fixup(id, dir);
        }
        (removed, rebalance)
    }

    /// Unlinks a node with at most one child, promoting that child.
    fn excise(&mut self, id: NodeId) -> ((K, V), Rebalance) {
        let node = self.arena.node(id);
        let child = node.left().or(node.right());

        let rebalance = if node.is_red() {
            Rebalance::Done
        } else if let Some(child) = child.filter(|&c| self.arena.node(c).is_red()) {
            self.arena.set_color(child, Color::Black);
            Rebalance::Done
        } else {
            Rebalance::NeedsFixup
        };

        self.arena.replace_in_parent(id, child);
        let node = self.arena.free(id);
        debug!(node = id.0, ?rebalance, "excised node");
        ((node.key, node.value), rebalance)
    }

    /// Restores black height when the `dir` side of `root` came up one short.
    fn remove_fixup(&mut self, root: NodeId, dir: Direction) -> Rebalance {
        let odir = dir.opposite();
        let mut sibling = self.arena.child(root, odir);

        if let Some(red) = sibling.filter(|&s| self.arena.node(s).is_red()) {
            // Red sibling: rotate it above `root`, which turns red and keeps
            // the short side. Its new sibling is the red one's inner child.
            trace!(root = root.0, sibling = red.0, "remove fixup: red sibling");
            self.arena.single_rotation(root, dir);
            sibling = self.arena.child(root, odir);
        }

        let Some(sibling) = sibling else {
            return Rebalance::NeedsFixup;
        };

        let near_red = self.arena.is_red(self.arena.child(sibling, dir));
        let far_red = self.arena.is_red(self.arena.child(sibling, odir));

        if !near_red && !far_red {
            trace!(root = root.0, "remove fixup: recolor");
            let done = self.arena.node(root).is_red();
            self.arena.set_color(root, Color::Black);
            self.arena.set_color(sibling, Color::Red);
            return if done {
                Rebalance::Done
            } else {
                Rebalance::NeedsFixup
            };
        }

        trace!(root = root.0, far_red, "remove fixup: rotate");
        let saved = self.arena.node(root).color;
        let top = if far_red {
            self.arena.single_rotation(root, dir)
        } else {
            self.arena.double_rotation(root, dir)
        };
        self.arena.set_color(top, saved);
        for dir in [Direction::Left, Direction::Right] {
            if let Some(child) = self.arena.child(top, dir) {
                self.arena.set_color(child, Color::Black);
            }
        }
        Rebalance::Done
    }
}

//! Invariant checker and diagnostics.
//!
//! Nothing here runs on the normal mutation path unless the tree was built
//! with `check_invariants`. It is the authority for correctness tests.

use std::fmt::{self, Write as _};

use tracing::debug;

use super::node::{Direction, NodeId};
use super::RbTree;

/// Result type for invariant checks.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A red-black or structural invariant that does not hold.
///
/// Only reachable through a defect in the rebalancing code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("root is red")]
    RedRoot,

    #[error("red node {node} has a red child")]
    RedViolation { node: usize },

    #[error("node {node} is out of key order")]
    OrderViolation { node: usize },

    #[error("black height mismatch under node {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: usize,
        left: usize,
        right: usize,
    },

    #[error("node {node} does not point back at its parent")]
    ParentMismatch { node: usize },

    #[error("size is {recorded} but {reachable} nodes are reachable")]
    SizeMismatch { recorded: usize, reachable: usize },
}

impl<K: Ord, V> RbTree<K, V> {
    /// Check every invariant, returning the black height of the tree.
    ///
    /// Absent children count as one black level, so an empty tree has a
    /// black height of 1 and a single black root gives 2.
    pub fn validate(&self) -> Result<usize> {
        let Some(root) = self.arena.root else {
            if self.size() != 0 {
                return Err(ValidationError::SizeMismatch {
                    recorded: self.size(),
                    reachable: 0,
                });
            }
            return Ok(1);
        };

        if self.arena.parent(root).is_some() {
            return Err(ValidationError::ParentMismatch { node: root.0 });
        }
        if self.arena.node(root).is_red() {
            return Err(ValidationError::RedRoot);
        }

        let mut reachable = 0;
        let black_height = self.check_subtree(root, None, None, &mut reachable)?;
        if reachable != self.size() {
            return Err(ValidationError::SizeMismatch {
                recorded: self.size(),
                reachable,
            });
        }
        debug!(size = reachable, black_height, "tree validated");
        Ok(black_height)
    }

    /// Panicking form of [`RbTree::validate`].
    pub fn assert_valid(&self) -> usize {
        match self.validate() {
            Ok(black_height) => black_height,
            Err(e) => panic!("invalid red-black tree: {e}"),
        }
    }

    /// Bottom-up check of one subtree; keys must lie strictly inside
    /// `(lower, upper)`.
    fn check_subtree(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        reachable: &mut usize,
    ) -> Result<usize> {
        let node = self.arena.node(id);
        *reachable += 1;

        if lower.is_some_and(|low| node.key <= *low) || upper.is_some_and(|up| node.key >= *up) {
            return Err(ValidationError::OrderViolation { node: id.0 });
        }

        let mut heights = [1, 1];
        for dir in [Direction::Left, Direction::Right] {
            let Some(child) = node.child(dir) else {
                continue;
            };
            if self.arena.parent(child) != Some(id) {
                return Err(ValidationError::ParentMismatch { node: child.0 });
            }
            if node.is_red() && self.arena.node(child).is_red() {
                return Err(ValidationError::RedViolation { node: id.0 });
            }
            let (low, up) = match dir {
                Direction::Left => (lower, Some(&node.key)),
                Direction::Right => (Some(&node.key), upper),
            };
            heights[dir as usize] = self.check_subtree(child, low, up, reachable)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(ValidationError::BlackHeightMismatch {
                node: id.0,
                left,
                right,
            });
        }
        Ok(if node.is_red() { left } else { left + 1 })
    }
}

impl<K, V> RbTree<K, V> {
    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.arena.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.arena.node(id);
            stack.extend(node.left().map(|l| (l, depth + 1)));
            stack.extend(node.right().map(|r| (r, depth + 1)));
        }
        deepest
    }

    /// Sideways dump of the tree shape, right subtree on top, one node per line.
    pub fn render(&self) -> String
    where
        K: fmt::Debug,
    {
        let mut out = String::new();
        if let Some(root) = self.arena.root {
            self.render_node(root, 0, &mut out);
        }
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String)
    where
        K: fmt::Debug,
    {
        let node = self.arena.node(id);
        if let Some(right) = node.right() {
            self.render_node(right, depth + 1, out);
        }
        let tag = if node.is_red() { 'R' } else { 'B' };
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{:indent$}{:?} ({tag})", "", node.key, indent = depth * 4);
        if let Some(left) = node.left() {
            self.render_node(left, depth + 1, out);
        }
    }
}

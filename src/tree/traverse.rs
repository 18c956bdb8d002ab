//! Depth-first visitors.
//!
//! The visitors are driven by [`Traversal`], a lazy iterator over an explicit
//! stack, so stopping early is simply not pulling the next item.

use super::node::{Arena, NodeId};
use super::RbTree;

/// Depth-first visiting order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Order {
    /// Left, node, right: ascending key order.
    InOrder,
    /// Node, left, right.
    PreOrder,
    /// Left, right, node.
    PostOrder,
}

/// Explicit-stack depth-first iterator over `(key, value)` pairs.
pub struct Traversal<'a, K, V> {
    arena: &'a Arena<K, V>,
    order: Order,
    /// Pending nodes; the flag marks nodes whose children were already pushed.
    stack: Vec<(NodeId, bool)>,
}

impl<'a, K, V> Traversal<'a, K, V> {
    pub(crate) fn new(arena: &'a Arena<K, V>, order: Order) -> Self {
        Self {
            arena,
            order,
            stack: arena.root.map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a, K, V> Iterator for Traversal<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some((id, expanded)) = self.stack.pop() {
            let node = arena.node(id);
            if expanded {
                return Some((&node.key, &node.value));
            }
            // Pushed in reverse of the order they must come out.
            let left = node.left().map(|l| (l, false));
            let right = node.right().map(|r| (r, false));
            match self.order {
                Order::PreOrder => {
                    self.stack.extend(right);
                    self.stack.extend(left);
                    return Some((&node.key, &node.value));
                }
                Order::InOrder => {
                    self.stack.extend(right);
                    self.stack.push((id, true));
                    self.stack.extend(left);
                }
                Order::PostOrder => {
                    self.stack.push((id, true));
                    self.stack.extend(right);
                    self.stack.extend(left);
                }
            }
        }
        None
    }
}

impl<K, V> RbTree<K, V> {
    /// Lazily walk the tree in the given order.
    pub fn traverse(&self, order: Order) -> Traversal<'_, K, V> {
        Traversal::new(&self.arena, order)
    }

    /// Visit entries in ascending key order until `visitor` returns `false`.
    ///
    /// Returns `false` if the visitor stopped the walk.
    pub fn visit_inorder<F>(&self, visitor: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.visit(Order::InOrder, visitor)
    }

    /// Visit entries node-first until `visitor` returns `false`.
    pub fn visit_preorder<F>(&self, visitor: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.visit(Order::PreOrder, visitor)
    }

    /// Visit entries children-first until `visitor` returns `false`.
    pub fn visit_postorder<F>(&self, visitor: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.visit(Order::PostOrder, visitor)
    }

    fn visit<F>(&self, order: Order, mut visitor: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.traverse(order).all(|(key, value)| visitor(key, value))
    }
}

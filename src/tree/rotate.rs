//! Rotation primitives.
//!
//! These are the only structural mutators used by rebalancing. Both work
//! purely on link updates inside the arena; keys and values never move.

use tracing::trace;

use super::node::{Arena, Color, Direction, NodeId};

impl<K, V> Arena<K, V> {
    /// Rotate the subtree at `root` towards `dir`.
    ///
    /// The child on the opposite side is promoted and becomes black, the old
    /// root turns red and moves down on the `dir` side. The slot that owned
    /// `root` now owns the promoted node, which is returned.
    pub(crate) fn single_rotation(&mut self, root: NodeId, dir: Direction) -> NodeId {
        let odir = dir.opposite();
        let save = self
            .child(root, odir)
            .unwrap_or_else(|| panic!("rotation {dir:?} needs a child on the {odir:?} side"));
        trace!(?dir, root = root.0, promoted = save.0, "single rotation");

        self.replace_in_parent(root, Some(save));

        // The inner grandchild changes owner.
        let inner = self.child(save, dir);
        self.node_mut(root).set_child(odir, inner);
        self.set_parent(inner, Some(root));

        self.node_mut(save).set_child(dir, Some(root));
        self.node_mut(root).parent = Some(save);

        self.set_color(root, Color::Red);
        self.set_color(save, Color::Black);
        save
    }

    /// Rotate the `!dir` child away from `dir`, then rotate `root` towards `dir`.
    pub(crate) fn double_rotation(&mut self, root: NodeId, dir: Direction) -> NodeId {
        let odir = dir.opposite();
        if let Some(child) = self.child(root, odir) {
            self.single_rotation(child, odir);
        }
        self.single_rotation(root, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::super::node::Node;
    use super::*;

    /// Builds `a <- b -> c` with `b` under the root slot, returning `[a, b, c]`.
    fn triple() -> (Arena<u8, ()>, [NodeId; 3]) {
        let mut arena = Arena::with_capacity(3);
        let b = arena.alloc(Node::new(None, 2, ()));
        let a = arena.alloc(Node::new(Some(b), 1, ()));
        let c = arena.alloc(Node::new(Some(b), 3, ()));
        arena.node_mut(b).set_child(Direction::Left, Some(a));
        arena.node_mut(b).set_child(Direction::Right, Some(c));
        arena.root = Some(b);
        (arena, [a, b, c])
    }

    #[test]
    fn test_single_rotation_left_promotes_right_child() {
        let (mut arena, [a, b, c]) = triple();
        let top = arena.single_rotation(b, Direction::Left);

        assert_eq!(top, c);
        assert_eq!(arena.root, Some(c));
        assert_eq!(arena.parent(c), None);
        assert_eq!(arena.child(c, Direction::Left), Some(b));
        assert_eq!(arena.parent(b), Some(c));
        assert_eq!(arena.child(b, Direction::Left), Some(a));
        assert_eq!(arena.child(b, Direction::Right), None);
        assert!(arena.is_red(Some(b)));
        assert!(!arena.is_red(Some(c)));
    }

    #[test]
    fn test_single_rotation_moves_inner_grandchild() {
        let (mut arena, [a, b, c]) = triple();
        let inner = arena.alloc(Node::new(Some(a), 1, ()));
        arena.node_mut(a).set_child(Direction::Right, Some(inner));

        arena.single_rotation(b, Direction::Right);

        assert_eq!(arena.root, Some(a));
        assert_eq!(arena.child(a, Direction::Right), Some(b));
        assert_eq!(arena.child(b, Direction::Left), Some(inner));
        assert_eq!(arena.parent(inner), Some(b));
        assert_eq!(arena.child(b, Direction::Right), Some(c));
    }

    #[test]
    fn test_double_rotation_promotes_inner_grandchild() {
        let (mut arena, [a, b, _]) = triple();
        let inner = arena.alloc(Node::new(Some(a), 1, ()));
        arena.node_mut(a).set_child(Direction::Right, Some(inner));

        let top = arena.double_rotation(b, Direction::Right);

        assert_eq!(top, inner);
        assert_eq!(arena.root, Some(inner));
        assert_eq!(arena.child(inner, Direction::Left), Some(a));
        assert_eq!(arena.child(inner, Direction::Right), Some(b));
        assert_eq!(arena.parent(a), Some(inner));
        assert_eq!(arena.parent(b), Some(inner));
    }
}

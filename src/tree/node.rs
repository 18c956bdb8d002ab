//! Node representation and arena ownership.
//!
//! Nodes are stored in a slab and addressed by [`NodeId`]. A parent owns its
//! children through the `children` slots; the `parent` field is an
//! observing back-link and never keeps a node alive.

use slab::Slab;

/// Red-Black tree node color
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Side of a node, used symmetrically by the rebalancing code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Direction {
    Left = 0,
    Right = 1,
}

impl Direction {
    /// The mirrored side.
    pub(crate) fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Stable index of a node inside the arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    /// `None` for the root.
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: [Option<NodeId>; 2],
}

impl<K, V> Node<K, V> {
    /// New nodes are born red and reconciled by the insertion fixup.
    pub(crate) fn new(parent: Option<NodeId>, key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }

    pub(crate) fn child(&self, dir: Direction) -> Option<NodeId> {
        self.children[dir as usize]
    }

    pub(crate) fn set_child(&mut self, dir: Direction, child: Option<NodeId>) {
        self.children[dir as usize] = child;
    }

    pub(crate) fn left(&self) -> Option<NodeId> {
        self.child(Direction::Left)
    }

    pub(crate) fn right(&self) -> Option<NodeId> {
        self.child(Direction::Right)
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// Slab of nodes plus the owning root slot.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    nodes: Slab<Node<K, V>>,
    pub(crate) root: Option<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        NodeId(self.nodes.insert(node))
    }

    /// Drops the node from the arena. The caller must already have unlinked it.
    pub(crate) fn free(&mut self, id: NodeId) -> Node<K, V> {
        self.nodes.remove(id.0)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Ids are only ever handed out for live nodes, so a miss is a broken link.
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn child(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        self.node(id).child(dir)
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Absent children count as black.
    pub(crate) fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).is_red())
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    pub(crate) fn set_parent(&mut self, id: Option<NodeId>, parent: Option<NodeId>) {
        if let Some(id) = id {
            self.node_mut(id).parent = parent;
        }
    }

    /// Re-points whichever slot owns `old` (a parent's child slot or the
    /// root slot) at `new`, and gives `new` the old parent.
    pub(crate) fn replace_in_parent(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.parent(old);
        match parent {
            None => self.root = new,
            Some(p) => {
                let dir = if self.node(p).left() == Some(old) {
                    Direction::Left
                } else {
                    Direction::Right
                };
                self.node_mut(p).set_child(dir, new);
            }
        }
        self.set_parent(new, parent);
    }

    /// Left-most node of the subtree rooted at `id`.
    pub(crate) fn min_of(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left() {
            id = left;
        }
        id
    }

    /// Right-most node of the subtree rooted at `id`.
    pub(crate) fn max_of(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right() {
            id = right;
        }
        id
    }

    /// In-order successor, found through the right subtree or the parent chain.
    pub(crate) fn next(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right() {
            return Some(self.min_of(right));
        }
        let mut node = id;
        while let Some(parent) = self.parent(node) {
            if self.node(parent).left() == Some(node) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    /// In-order predecessor, the mirror image of [`Arena::next`].
    pub(crate) fn prev(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left() {
            return Some(self.max_of(left));
        }
        let mut node = id;
        while let Some(parent) = self.parent(node) {
            if self.node(parent).right() == Some(node) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    pub(crate) fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.min_of(root))
    }

    pub(crate) fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.max_of(root))
    }
}

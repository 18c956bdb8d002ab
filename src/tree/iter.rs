//! Bidirectional stepping over entries in key order.
//!
//! Stepping follows parent back-links only: no stack, no recursion. A cursor
//! positioned past the last entry is the `end` sentinel; stepping back from
//! it lands on the maximum.

use std::iter::FusedIterator;
use std::ptr;

use super::node::{Arena, NodeId};
use super::RbTree;

/// Read-only cursor over a tree.
pub struct Cursor<'a, K, V> {
    arena: &'a Arena<K, V>,
    /// `None` is the one-past-last position.
    current: Option<NodeId>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Entry under the cursor, `None` at `end`.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let node = self.arena.node(self.current?);
        Some((&node.key, &node.value))
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Step to the successor. Stepping past the maximum reaches `end`,
    /// which is a fixed point.
    pub fn move_next(&mut self) {
        self.current = self.current.and_then(|id| self.arena.next(id));
    }

    /// Step to the predecessor. From `end` this lands on the maximum; from the
    /// minimum it reaches `end`.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            None => self.arena.last(),
            Some(id) => self.arena.prev(id),
        };
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    /// Same tree, same position.
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.arena, other.arena) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

/// Cursor that can mutate values in place. Keys stay immutable.
pub struct CursorMut<'a, K, V> {
    arena: &'a mut Arena<K, V>,
    current: Option<NodeId>,
}

impl<K, V> CursorMut<'_, K, V> {
    pub fn get(&self) -> Option<(&K, &V)> {
        let node = self.arena.node(self.current?);
        Some((&node.key, &node.value))
    }

    pub fn get_mut(&mut self) -> Option<(&K, &mut V)> {
        let node = self.arena.node_mut(self.current?);
        Some((&node.key, &mut node.value))
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn move_next(&mut self) {
        self.current = self.current.and_then(|id| self.arena.next(id));
    }

    pub fn move_prev(&mut self) {
        self.current = match self.current {
            None => self.arena.last(),
            Some(id) => self.arena.prev(id),
        };
    }

    /// Read-only view of the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor {
            arena: self.arena,
            current: self.current,
        }
    }
}

/// Ascending iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.arena.next(id);
        let node = self.arena.node(id);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.arena.prev(id);
        let node = self.arena.node(id);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Ascending iterator over keys.
pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over values, in ascending key order.
pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Owning iterator, ascending key order.
pub struct IntoIter<K, V>(std::vec::IntoIter<(K, V)>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.0.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> RbTree<K, V> {
    /// Cursor on the minimum, or `end` for an empty tree.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor {
            arena: &self.arena,
            current: self.arena.first(),
        }
    }

    /// The one-past-last sentinel.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor {
            arena: &self.arena,
            current: None,
        }
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        let current = self.arena.first();
        CursorMut {
            arena: &mut self.arena,
            current,
        }
    }

    pub fn end_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut {
            arena: &mut self.arena,
            current: None,
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            front: self.arena.first(),
            back: self.arena.last(),
            remaining: self.size(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }
}

impl<'a, K, V> IntoIterator for &'a RbTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for RbTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        let mut order = Vec::with_capacity(self.size());
        let mut current = self.arena.first();
        while let Some(id) = current {
            order.push(id);
            current = self.arena.next(id);
        }
        let entries: Vec<(K, V)> = order
            .into_iter()
            .map(|id| {
                let node = self.arena.free(id);
                (node.key, node.value)
            })
            .collect();
        self.arena.root = None;
        IntoIter(entries.into_iter())
    }
}

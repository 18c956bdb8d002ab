//! rbmap - ordered map backed by a red-black tree
//!
//! An arena-backed red-black tree providing insert, update, lookup and
//! delete on a totally ordered key with a guaranteed O(log n) height, plus
//! order-preserving bidirectional traversal driven by parent back-links.

pub mod config;
pub mod tree;
pub mod utils;

pub use config::{ConfigError, TreeConfig};
pub use tree::{
    Cursor, CursorMut, InsertOutcome, IntoIter, Iter, Keys, Order, RbTree, Traversal,
    ValidationError, Values,
};

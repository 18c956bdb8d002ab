//! Step definitions for the tree map scenarios.

use cucumber::{given, then, when, World};
use rbmap::{InsertOutcome, Order, RbTree};

/// Test context for tree scenarios.
#[derive(Debug, Default, World)]
pub struct TreeWorld {
    tree: RbTree<i32, String>,
    last_outcome: Option<InsertOutcome>,
    last_removed: Option<Option<String>>,
}

impl TreeWorld {
    fn record_insert(&mut self, outcome: InsertOutcome) {
        self.last_outcome = Some(outcome);
        self.tree.assert_valid();
    }
}

fn parse_keys(list: &str) -> Vec<i32> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse().expect("key list must hold integers"))
        .collect()
}

fn join_keys(keys: impl Iterator<Item = i32>) -> String {
    keys.map(|k| k.to_string()).collect::<Vec<_>>().join(",")
}

// ==========================================================================
// Given
// ==========================================================================

#[given("an empty tree")]
fn empty_tree(world: &mut TreeWorld) {
    world.tree = RbTree::new();
}

// ==========================================================================
// When
// ==========================================================================

#[when(expr = "I insert the keys {string}")]
fn insert_keys(world: &mut TreeWorld, keys: String) {
    for key in parse_keys(&keys) {
        let outcome = world.tree.insert(key, key.to_string());
        assert_eq!(outcome, InsertOutcome::Inserted, "inserting {key}");
        world.record_insert(outcome);
    }
}

#[when(expr = "I insert key {int} with value {string}")]
fn insert_key(world: &mut TreeWorld, key: i32, value: String) {
    let outcome = world.tree.insert(key, value);
    world.record_insert(outcome);
}

#[when(expr = "I insert or update key {int} with value {string}")]
fn upsert_key(world: &mut TreeWorld, key: i32, value: String) {
    let outcome = world.tree.insert_or_update(key, value);
    world.record_insert(outcome);
}

#[when(expr = "I remove key {int}")]
fn remove_key(world: &mut TreeWorld, key: i32) {
    world.last_removed = Some(world.tree.remove(&key));
    world.tree.assert_valid();
}

#[when("I clear the tree")]
fn clear_tree(world: &mut TreeWorld) {
    world.tree.clear();
    world.tree.assert_valid();
}

// ==========================================================================
// Then
// ==========================================================================

#[then(expr = "the insert outcome is {word}")]
fn insert_outcome_is(world: &mut TreeWorld, expected: String) {
    let outcome = world.last_outcome.expect("no insert was attempted");
    assert_eq!(format!("{outcome:?}"), expected);
}

#[then(expr = "the removed value is {string}")]
fn removed_value_is(world: &mut TreeWorld, expected: String) {
    assert_eq!(world.last_removed, Some(Some(expected)));
}

#[then("nothing was removed")]
fn nothing_removed(world: &mut TreeWorld) {
    assert_eq!(world.last_removed, Some(None));
}

#[then(expr = "looking up key {int} finds {string}")]
fn lookup_finds(world: &mut TreeWorld, key: i32, expected: String) {
    assert_eq!(world.tree.find(&key), Some(&expected));
}

#[then(expr = "looking up key {int} finds nothing")]
fn lookup_finds_nothing(world: &mut TreeWorld, key: i32) {
    assert_eq!(world.tree.find(&key), None);
}

#[then(expr = "the size is {int}")]
fn size_is(world: &mut TreeWorld, expected: usize) {
    assert_eq!(world.tree.size(), expected);
    assert_eq!(world.tree.iter().count(), expected);
}

#[then("the tree is empty")]
fn tree_is_empty(world: &mut TreeWorld) {
    assert!(world.tree.is_empty());
}

#[then(expr = "the in-order keys are {string}")]
fn inorder_keys_are(world: &mut TreeWorld, expected: String) {
    let keys = world.tree.traverse(Order::InOrder).map(|(k, _)| *k);
    assert_eq!(join_keys(keys), expected);
}

#[then(expr = "the pre-order keys are {string}")]
fn preorder_keys_are(world: &mut TreeWorld, expected: String) {
    let keys = world.tree.traverse(Order::PreOrder).map(|(k, _)| *k);
    assert_eq!(join_keys(keys), expected);
}

#[then(expr = "the black height is {int}")]
fn black_height_is(world: &mut TreeWorld, expected: usize) {
    assert_eq!(world.tree.validate(), Ok(expected));
}

#[then(expr = "the height is at most {int}")]
fn height_at_most(world: &mut TreeWorld, bound: usize) {
    assert!(world.tree.height() <= bound, "height {}", world.tree.height());
}

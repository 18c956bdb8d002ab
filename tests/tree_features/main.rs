//! Gherkin scenarios for the tree map contract.
//!
//! ```bash
//! cargo test --test tree_features
//! ```

mod steps;

use cucumber::World;
use steps::TreeWorld;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    TreeWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/tree_features/features/rbtree.feature")
        .await;
}

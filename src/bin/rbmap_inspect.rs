//! rbmap-inspect: apply a sequence of operations to a tree and dump it
//!
//! Each argument is one operation on an `RbTree<i64, usize>`:
//! - `N` or `+N`: insert key N (value is the argument position)
//! - `-N`: remove key N
//! - `=N`: look up key N
//!
//! After the last operation the tree is validated and printed: in-order
//! keys, black height, height and the rendered shape.
//!
//! ## Configuration
//! - RBMAP_LOG: tracing filter (default: info)
//! - RBMAP_CONFIG: optional YAML file with tree settings
//! - RBMAP__CHECK_INVARIANTS / RBMAP__INITIAL_CAPACITY: overrides

use std::process::ExitCode;

use tracing::{error, info};

use rbmap::utils::bootstrap::init_tracing;
use rbmap::{RbTree, TreeConfig};

const USAGE: &str = "usage: rbmap-inspect [N | +N | -N | =N]...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Insert(i64),
    Remove(i64),
    Find(i64),
}

fn parse_op(arg: &str) -> Option<Op> {
    let op = match arg.as_bytes().first()? {
        b'+' => Op::Insert(arg[1..].parse().ok()?),
        b'-' => Op::Remove(arg[1..].parse().ok()?),
        b'=' => Op::Find(arg[1..].parse().ok()?),
        _ => Op::Insert(arg.parse().ok()?),
    };
    Some(op)
}

fn main() -> ExitCode {
    init_tracing();

    let config = match TreeConfig::load(None) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::from(1);
        }
    };

    let mut ops = Vec::new();
    for arg in std::env::args().skip(1) {
        match parse_op(&arg) {
            Some(op) => ops.push(op),
            None => {
                eprintln!("invalid operation '{arg}'\n{USAGE}");
                return ExitCode::from(2);
            }
        }
    }

    let mut tree: RbTree<i64, usize> = RbTree::with_config(&config);
    for (position, op) in ops.into_iter().enumerate() {
        match op {
            Op::Insert(key) => {
                let outcome = tree.insert(key, position);
                info!(key, ?outcome, "insert");
            }
            Op::Remove(key) => {
                let removed = tree.remove(&key);
                info!(key, ?removed, "remove");
            }
            Op::Find(key) => match tree.find(&key) {
                Some(value) => println!("{key} => {value}"),
                None => println!("{key} => (absent)"),
            },
        }
    }

    let black_height = match tree.validate() {
        Ok(black_height) => black_height,
        Err(e) => {
            error!(error = %e, "tree failed validation");
            return ExitCode::from(1);
        }
    };

    let keys: Vec<String> = tree.keys().map(i64::to_string).collect();
    println!("size:         {}", tree.size());
    println!("in-order:     {}", keys.join(" "));
    println!("black height: {black_height}");
    println!("height:       {}", tree.height());
    print!("{}", tree.render());
    ExitCode::SUCCESS
}

//! Snapshot tests for console output and partition layouts
//!
//! Review changes: `cargo insta review`

use std::time::Duration;

use collatz_core::partition;
use mt_collatz::{Config, LockMode, Summary};

fn layout(total: usize, workers: usize) -> String {
    partition(total, workers)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_summary_locked() {
    let config = Config::from_requested(10, 4).unwrap();
    let summary = Summary::new(&config, Duration::from_millis(250));
    insta::assert_snapshot!(summary.to_string(), @r"
    Completed 10 computations with 4 threads
    Locking: enabled
    Time: 0.25seconds
    ");
}

#[test]
fn test_summary_unlocked_clamped() {
    let config = Config::from_requested(1, 5).unwrap().with_lock_mode(LockMode::Unlocked);
    let summary = Summary::new(&config, Duration::from_secs(2));
    insta::assert_snapshot!(summary.to_string(), @r"
    Completed 1 computations with 1 threads
    Locking: disabled
    Time: 2seconds
    ");
}

#[test]
fn test_partition_layouts() {
    insta::assert_snapshot!(layout(10, 4), @"[0, 3) [3, 6) [6, 8) [8, 10)");
    insta::assert_snapshot!(layout(7, 3), @"[0, 3) [3, 5) [5, 7)");
    insta::assert_snapshot!(layout(5, 5), @"[0, 1) [1, 2) [2, 3) [3, 4) [4, 5)");
    insta::assert_snapshot!(layout(9, 1), @"[0, 9)");
}

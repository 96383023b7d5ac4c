//! End-to-end tests for the partition → pool → store pipeline in both write modes

use std::sync::Arc;

use collatz_core::{LockMode, ResultStore, WorkerPool, partition};

fn run(total: usize, workers: usize, mode: LockMode) -> Arc<ResultStore> {
    let store = Arc::new(ResultStore::new(total));
    WorkerPool::new(mode)
        .run(&partition(total, workers), &store)
        .expect("pool run failed");
    store
}

#[test]
fn test_both_modes_write_every_slot_once() {
    for (total, workers) in [(1, 1), (10, 4), (97, 8), (1_000, 16), (513, 513)] {
        for mode in [LockMode::Locked, LockMode::Unlocked] {
            let store = run(total, workers, mode);
            assert_eq!(store.len(), total, "N={total} T={workers} {mode:?}");
            assert_eq!(store.written_count(), total, "N={total} T={workers} {mode:?}");
        }
    }
}

#[test]
fn test_repeated_runs_have_identical_shape() {
    let first = run(2_000, 6, LockMode::Unlocked).export();
    let second = run(2_000, 6, LockMode::Unlocked).export();
    assert_eq!(first.len(), second.len());
    assert!(first.iter().chain(second.iter()).all(|t| t.as_secs_f64() >= 0.0));
}

#[test]
fn test_single_item_with_many_requested_workers() {
    // N=1, T=5 clamps to one worker; item 1 is already at 1 so the loop body never runs.
    let workers = 5usize.min(1);
    let store = run(1, workers, LockMode::Locked);
    let exported = store.export();
    assert_eq!(exported.len(), 1);
    assert!(exported[0].as_secs_f64() >= 0.0);
    assert!(exported[0].as_secs_f64() < 1.0);
}

#[test]
fn test_store_is_released_by_workers_after_join() {
    let store = run(64, 4, LockMode::Locked);
    assert_eq!(Arc::strong_count(&store), 1);
}

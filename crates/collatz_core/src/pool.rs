//! Thread-per-range worker pool with a single join barrier.
//!
//! ## Design
//!
//! - One named OS thread per [`WorkRange`]. Each worker walks its range in order, times work item `i + 1`
//!   and writes the timing into slot `i` of the shared [`ResultStore`].
//! - The store is shared by `Arc`; workers hold it only for the lifetime of their range.
//! - [`WorkerPool::run`] returns only after every spawned worker has been joined, so the caller can read the
//!   store without further synchronization.
//! - No retries. The first failure (store rejection, spawn failure or panic) is reported after the barrier.

use std::io;
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::partition::{PartitionError, WorkRange, verify_disjoint_cover};
use crate::sequence::time_sequence;
use crate::store::{LockMode, ResultStore, StoreError};

/// Errors surfaced by [`WorkerPool::run`].
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("refusing unlocked dispatch: {0}")]
    Partition(#[from] PartitionError),

    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker {worker} failed: {source}")]
    Store {
        worker: usize,
        #[source]
        source: StoreError,
    },

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

/// Spawns one worker per range and joins them all.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    lock_mode: LockMode,
}

impl WorkerPool {
    pub fn new(lock_mode: LockMode) -> Self {
        Self { lock_mode }
    }

    pub fn lock_mode(&self) -> LockMode {
        self.lock_mode
    }

    /// Run every range to completion on its own thread.
    ///
    /// ## Parameters
    /// - `ranges`: one range per worker; for unlocked writes they must cover `[0, store.len())` disjointly.
    /// - `store`: the shared store, pre-sized to hold every slot the ranges touch.
    ///
    /// ## Returns
    /// - `Ok(())` once all workers have been joined without error.
    /// - `Err(PoolError)` with the first failure observed. Workers that were already running are still joined
    ///   before this returns.
    ///
    /// ## Notes
    /// - In [`LockMode::Unlocked`] the ranges are checked with [`verify_disjoint_cover`] before any thread is
    ///   spawned; nothing is written if the check fails.
    #[tracing::instrument(skip_all, fields(workers = ranges.len(), slots = store.len(), locking = %self.lock_mode))]
    pub fn run(&self, ranges: &[WorkRange], store: &Arc<ResultStore>) -> Result<(), PoolError> {
        if !self.lock_mode.is_locked() {
            verify_disjoint_cover(ranges, store.len())?;
        }

        let mut first_error: Option<PoolError> = None;
        let mut handles = Vec::with_capacity(ranges.len());
        for (worker, &range) in ranges.iter().enumerate() {
            let store = Arc::clone(store);
            let lock_mode = self.lock_mode;
            let spawned = thread::Builder::new()
                .name(format!("collatz-worker-{worker}"))
                .spawn(move || run_worker(worker, range, &store, lock_mode));
            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(source) => {
                    tracing::error!(worker, %source, "failed to spawn worker");
                    first_error = Some(PoolError::Spawn { worker, source });
                    break;
                }
            }
        }

        // Join barrier
        for (worker, handle) in handles {
            let outcome = handle.join().unwrap_or_else(|_| {
                tracing::error!(worker, "worker panicked");
                Err(PoolError::WorkerPanicked { worker })
            });
            if let Err(err) = outcome {
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn run_worker(worker: usize, range: WorkRange, store: &ResultStore, lock_mode: LockMode) -> Result<(), PoolError> {
    tracing::debug!(worker, %range, "worker started");
    for index in range.indices() {
        let item = index as u64 + 1;
        store
            .write(index, time_sequence(item), lock_mode)
            .map_err(|source| PoolError::Store { worker, source })?;
    }
    tracing::debug!(worker, items = range.len(), "worker finished");
    Ok(())
}

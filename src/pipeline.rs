//! Partition → dispatch → join, driven by a [`Config`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use collatz_core::{PoolError, ResultStore, TimingResult, WorkRange, WorkerPool, partition};

use crate::config::Config;

/// Everything a finished run hands to the reporter.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Per-item timings in slot order; entry `i` is for work item `i + 1`
    pub timings: Vec<TimingResult>,
    /// The ranges the workers were given
    pub ranges: Vec<WorkRange>,
    /// Wall-clock time of the whole partition, dispatch and join cycle
    pub elapsed: Duration,
}

/// Time every item in `1..=config.total` across `config.workers` threads.
///
/// The store is allocated up front, before the clock starts and before any worker exists.
///
/// ## Errors
/// - Any [`PoolError`] from the worker pool. No partial results are returned.
#[tracing::instrument(skip_all, fields(total = config.total, workers = config.workers, locking = %config.lock_mode))]
pub fn compute(config: &Config) -> Result<RunReport, PoolError> {
    let store = Arc::new(ResultStore::new(config.total));

    let started = Instant::now();
    let ranges = partition(config.total, config.workers);
    WorkerPool::new(config.lock_mode).run(&ranges, &store)?;
    let elapsed = started.elapsed();

    tracing::debug!(
        written = store.written_count(),
        elapsed_secs = elapsed.as_secs_f64(),
        "all workers joined"
    );

    Ok(RunReport {
        timings: store.export(),
        ranges,
        elapsed,
    })
}

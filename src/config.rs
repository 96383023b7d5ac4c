//! Run configuration for mt-collatz
//!
//! A [`Config`] is built once from the requested `N` and `T`, normalized, and never changed afterwards.

use std::path::{Path, PathBuf};

use collatz_core::LockMode;

/// Output file written when no `--output` path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "collatzTime.csv";

/// Normalized run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of work items (`N`); always at least 1
    pub total: usize,
    /// Number of workers (`T`); always in `1..=total`
    pub workers: usize,
    /// Store write strategy
    pub lock_mode: LockMode,
    /// Where the per-item timings are written
    pub output: PathBuf,
}

impl Config {
    /// Normalize the raw `N` and `T` given on the command line.
    ///
    /// ## Returns
    /// - `None` when `total <= 0`: there is nothing to compute.
    /// - `Some(Config)` otherwise, with `workers` raised to 1 if non-positive and lowered to `total` if larger.
    ///
    /// ## Notes
    /// - Locking defaults to enabled and the output to [`DEFAULT_OUTPUT_FILE`]; use the `with_*` methods to
    ///   change them.
    pub fn from_requested(total: i64, workers: i64) -> Option<Self> {
        if total <= 0 {
            tracing::debug!(total, "nothing to compute");
            return None;
        }
        let total = usize::try_from(total).unwrap_or(usize::MAX);

        let workers = if workers <= 0 {
            tracing::warn!(requested = workers, "worker count raised to 1");
            1
        } else {
            let requested = usize::try_from(workers).unwrap_or(usize::MAX);
            if requested > total {
                tracing::warn!(requested, total, "worker count lowered to the number of items");
                total
            } else {
                requested
            }
        };

        Some(Self {
            total,
            workers,
            lock_mode: LockMode::Locked,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        })
    }

    /// Set the store write strategy
    pub fn with_lock_mode(mut self, lock_mode: LockMode) -> Self {
        self.lock_mode = lock_mode;
        self
    }

    /// Set the output file
    pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }
}

//! Timing file output and the console summary.
//!
//! ## File format
//!
//! One line per slot in index order, each the decimal fractional-seconds timing for work item `i + 1`.
//! No header. An existing file at the same path is overwritten.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use collatz_core::{LockMode, TimingResult};
use thiserror::Error;

use crate::config::Config;

/// Errors that occur while writing the timing file
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write `timings` to `path`, one value per line.
#[tracing::instrument(skip_all, fields(path = %path.display(), lines = timings.len()))]
pub fn write_timings(path: &Path, timings: &[TimingResult]) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    render_timings(BufWriter::new(file), timings).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Render `timings` into any writer and flush it.
pub fn render_timings<W: Write>(mut out: W, timings: &[TimingResult]) -> io::Result<()> {
    for timing in timings {
        writeln!(out, "{timing}")?;
    }
    out.flush()
}

/// Completion summary printed after a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub workers: usize,
    pub lock_mode: LockMode,
    pub elapsed: Duration,
}

impl Summary {
    pub fn new(config: &Config, elapsed: Duration) -> Self {
        Self {
            total: config.total,
            workers: config.workers,
            lock_mode: config.lock_mode,
            elapsed,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed {} computations with {} threads", self.total, self.workers)?;
        writeln!(f, "Locking: {}", self.lock_mode)?;
        write!(f, "Time: {}seconds", self.elapsed.as_secs_f64())
    }
}

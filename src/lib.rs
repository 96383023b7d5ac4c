#![forbid(unsafe_code)]
//! mt-collatz: multithreaded Collatz sequence timing
//!
//! Times the Collatz walk of every integer in `1..=N` across `T` worker threads and writes one timing per line
//! for later histogram analysis. The parallel core (partitioning, timing, result store, worker pool) lives in
//! the `collatz_core` crate; this crate adds configuration, the reporter and the CLI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module and
//!   `collatz_core` enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a logic error, use `assert!` / `.expect()` with an
//!   `"INVARIANT: reason"` message.

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod report;
pub mod version;

pub use collatz_core::{LockMode, TimingResult, WorkRange};
pub use config::{Config, DEFAULT_OUTPUT_FILE};
pub use pipeline::{RunReport, compute};
pub use report::{ReportError, Summary, write_timings};

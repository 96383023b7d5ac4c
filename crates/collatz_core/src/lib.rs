#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
//! Provide the parallel core of `mt-collatz`: per-item Collatz timing, work partitioning, a pre-sized result
//! store and a thread-per-range worker pool.
//!
//! This crate is intentionally small and dependency-light. It performs **no I/O** and holds no global state;
//! the store is an explicit object shared with workers through an `Arc`.
//!
//! ## Pipeline
//!
//! ```text
//! partition(N, T) ──► [WorkRange; T] ──► WorkerPool::run ──► ResultStore ──► export()
//!                                          │
//!                                          └── time_sequence(i + 1) for every i in a range
//! ```
//!
//! ## Notes
//!
//! - Slot `i` of the store always holds the timing for work item `i + 1`.
//! - In [`LockMode::Unlocked`], correctness rests on the ranges being disjoint. The pool re-checks that with
//!   [`verify_disjoint_cover`] before dispatch, and the store refuses a second write to any slot.

pub mod partition;
pub mod pool;
pub mod sequence;
pub mod store;

pub use partition::{PartitionError, WorkRange, partition, verify_disjoint_cover};
pub use pool::{PoolError, WorkerPool};
pub use sequence::{SequenceSample, TimingResult, collatz_steps, sample_sequence, time_sequence};
pub use store::{LockMode, ResultStore, StoreError};

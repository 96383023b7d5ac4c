//! Contiguous work partitioning over the slot index space `[0, N)`.
//!
//! ## Notes
//!
//! - [`partition`] is pure arithmetic: `base = N / T`, `remainder = N % T`, and the first `remainder` ranges
//!   take one extra slot. No two ranges differ in size by more than one.
//! - [`verify_disjoint_cover`] re-checks a set of ranges from scratch (sort + sweep), so the lock-free write
//!   path never has to trust the arithmetic alone.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// A half-open slice `[start, end)` of slot indices handed to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkRange {
    /// First slot index (inclusive)
    pub start: usize,
    /// One past the last slot index (exclusive)
    pub end: usize,
}

impl WorkRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of slots in the range; `0` for empty or inverted ranges.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot indices covered by this range.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the two ranges share at least one slot.
    pub fn overlaps(&self, other: &WorkRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for WorkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `[0, total)` into `workers` contiguous ranges of near-equal size.
///
/// ## Parameters
/// - `total`: number of work items (`N`); must be at least 1.
/// - `workers`: number of ranges (`T`); must lie in `1..=total`.
///
/// ## Returns
/// - (`Vec<WorkRange>`): exactly `workers` non-empty ranges in increasing order, covering `[0, total)`.
///
/// ## Panics
/// - If `workers` is outside `1..=total`. Callers clamp the requested worker count first.
///
/// ## Examples
/// ```rust
/// use collatz_core::{partition, WorkRange};
/// let ranges = partition(10, 4);
/// assert_eq!(
///     ranges,
///     vec![WorkRange::new(0, 3), WorkRange::new(3, 6), WorkRange::new(6, 8), WorkRange::new(8, 10)]
/// );
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(total = total, workers = workers))]
pub fn partition(total: usize, workers: usize) -> Vec<WorkRange> {
    assert!(
        (1..=total).contains(&workers),
        "INVARIANT: worker count {workers} must be clamped into 1..={total} before partitioning"
    );

    let base = total / workers;
    let remainder = total % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let size = if worker < remainder { base + 1 } else { base };
        ranges.push(WorkRange::new(start, start + size));
        start += size;
    }
    debug_assert_eq!(start, total);
    ranges
}

/// Ways a set of ranges can fail to partition `[0, total)` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("no work ranges supplied for {total} slots")]
    NoRanges { total: usize },

    #[error("work range {range} is empty")]
    EmptyRange { range: WorkRange },

    #[error("work ranges {first} and {second} overlap")]
    Overlap { first: WorkRange, second: WorkRange },

    #[error("slots [{start}, {end}) are not covered by any work range")]
    Gap { start: usize, end: usize },

    #[error("work range {range} extends past the store size of {total}")]
    OutOfBounds { range: WorkRange, total: usize },
}

/// Check that `ranges` cover `[0, total)` exactly once, without relying on how they were produced.
///
/// ## Parameters
/// - `ranges`: ranges in any order.
/// - `total`: size of the index space they must cover.
///
/// ## Returns
/// - `Ok(())` when the ranges are non-empty, pairwise disjoint, and their union is `[0, total)`.
/// - `Err(PartitionError)` describing the first violation found in start order.
pub fn verify_disjoint_cover(ranges: &[WorkRange], total: usize) -> Result<(), PartitionError> {
    if ranges.is_empty() {
        return if total == 0 {
            Ok(())
        } else {
            Err(PartitionError::NoRanges { total })
        };
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| (range.start, range.end));

    let mut covered_to = 0;
    let mut previous: Option<WorkRange> = None;
    for range in sorted {
        if range.is_empty() {
            return Err(PartitionError::EmptyRange { range });
        }
        if let Some(prev) = previous.filter(|prev| prev.overlaps(&range)) {
            return Err(PartitionError::Overlap {
                first: prev,
                second: range,
            });
        }
        if range.start > covered_to {
            return Err(PartitionError::Gap {
                start: covered_to,
                end: range.start,
            });
        }
        if range.end > total {
            return Err(PartitionError::OutOfBounds { range, total });
        }
        covered_to = range.end;
        previous = Some(range);
    }

    if covered_to < total {
        return Err(PartitionError::Gap {
            start: covered_to,
            end: total,
        });
    }
    Ok(())
}

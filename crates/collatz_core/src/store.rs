//! Pre-sized, write-once result store shared by all workers.
//!
//! Every slot is an `AtomicU64` holding the bit pattern of a [`TimingResult`]. That keeps the crate free of
//! `unsafe` while still letting the unlocked mode write straight into a slot with no lock taken.
//!
//! ## Write modes
//!
//! - [`LockMode::Locked`]: each single-slot write happens under one store-wide mutex. Writers serialize even
//!   though their indices never collide.
//! - [`LockMode::Unlocked`]: the write goes directly to the slot. The caller guarantees that index sets used
//!   concurrently by different workers are pairwise disjoint.
//!
//! In both modes a slot accepts exactly one value. A second write to the same slot is rejected with
//! [`StoreError::SlotAlreadyWritten`] and the first value is kept.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::sequence::TimingResult;

/// Bit pattern of a slot that has not been written yet.
///
/// This is a NaN payload, so it can never collide with a timing built from a `Duration`.
const EMPTY_SLOT: u64 = u64::MAX;

/// Synchronization strategy for store writes, chosen at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LockMode {
    /// Take the store lock around every write
    #[default]
    Locked,
    /// Trust the partition and write without the lock
    Unlocked,
}

impl LockMode {
    /// Map a "locking enabled" flag onto a mode.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            LockMode::Locked
        } else {
            LockMode::Unlocked
        }
    }

    pub fn is_locked(self) -> bool {
        self == LockMode::Locked
    }

    /// `"enabled"` or `"disabled"`, as shown on the console.
    pub fn label(self) -> &'static str {
        match self {
            LockMode::Locked => "enabled",
            LockMode::Unlocked => "disabled",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors returned by [`ResultStore::write`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("slot {index} is out of bounds for a store of {len} slots")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("slot {index} was written more than once")]
    SlotAlreadyWritten { index: usize },
}

/// Fixed-size store of per-item timings; slot `i` belongs to work item `i + 1`.
#[derive(Debug)]
pub struct ResultStore {
    slots: Box<[AtomicU64]>,
    write_lock: Mutex<()>,
}

impl ResultStore {
    /// Allocate `size` empty slots. The store never grows or shrinks afterwards.
    pub fn new(size: usize) -> Self {
        Self {
            slots: (0..size).map(|_| AtomicU64::new(EMPTY_SLOT)).collect(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record `value` in slot `index`.
    ///
    /// ## Parameters
    /// - `index`: slot to fill; must be below [`len`](Self::len).
    /// - `value`: the timing for work item `index + 1`.
    /// - `mode`: whether to serialize this write behind the store lock.
    ///
    /// ## Errors
    /// - [`StoreError::IndexOutOfBounds`] if `index >= len`.
    /// - [`StoreError::SlotAlreadyWritten`] if the slot already holds a value.
    pub fn write(&self, index: usize, value: TimingResult, mode: LockMode) -> Result<(), StoreError> {
        let slot = self.slots.get(index).ok_or(StoreError::IndexOutOfBounds {
            index,
            len: self.slots.len(),
        })?;

        match mode {
            LockMode::Locked => {
                // The lock guards no data, so a poisoned lock is still usable.
                let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
                fill(slot, index, value)
            }
            LockMode::Unlocked => fill(slot, index, value),
        }
    }

    /// Timing held by `index`, or `None` if the slot is out of range or still empty.
    pub fn get(&self, index: usize) -> Option<TimingResult> {
        let bits = self.slots.get(index)?.load(Ordering::Relaxed);
        (bits != EMPTY_SLOT).then(|| TimingResult::from_bits(bits))
    }

    /// Number of slots holding a value.
    pub fn written_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.load(Ordering::Relaxed) != EMPTY_SLOT)
            .count()
    }

    /// Whether every slot has been written.
    pub fn is_complete(&self) -> bool {
        self.written_count() == self.len()
    }

    /// Snapshot all slots in index order; unwritten slots read as [`TimingResult::ZERO`].
    ///
    /// Performs no synchronization. Only meaningful once every writer has been joined.
    pub fn export(&self) -> Vec<TimingResult> {
        self.slots
            .iter()
            .map(|slot| match slot.load(Ordering::Relaxed) {
                EMPTY_SLOT => TimingResult::ZERO,
                bits => TimingResult::from_bits(bits),
            })
            .collect()
    }
}

/// Claim an empty slot. Relaxed ordering suffices: the join barrier orders these writes before any export.
fn fill(slot: &AtomicU64, index: usize, value: TimingResult) -> Result<(), StoreError> {
    slot.compare_exchange(EMPTY_SLOT, value.to_bits(), Ordering::Relaxed, Ordering::Relaxed)
        .map(|_| ())
        .map_err(|_| StoreError::SlotAlreadyWritten { index })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn micros(n: u64) -> TimingResult {
        TimingResult::from_duration(Duration::from_micros(n))
    }

    #[test]
    fn test_new_store_is_sized_and_empty() {
        let store = ResultStore::new(4);
        assert_eq!(store.len(), 4);
        assert!(!store.is_empty());
        assert_eq!(store.written_count(), 0);
        assert!(!store.is_complete());
        assert_eq!(store.export(), vec![TimingResult::ZERO; 4]);
    }

    #[test]
    fn test_zero_sized_store() {
        let store = ResultStore::new(0);
        assert!(store.is_empty());
        assert!(store.is_complete());
        assert!(store.export().is_empty());
    }

    #[test]
    fn test_write_both_modes() {
        let store = ResultStore::new(2);
        store.write(0, micros(5), LockMode::Locked).unwrap();
        store.write(1, micros(7), LockMode::Unlocked).unwrap();
        assert_eq!(store.export(), vec![micros(5), micros(7)]);
        assert!(store.is_complete());
    }

    #[test]
    fn test_write_out_of_bounds() {
        let store = ResultStore::new(3);
        assert_eq!(
            store.write(3, micros(1), LockMode::Locked),
            Err(StoreError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_second_write_is_rejected_and_first_value_kept() {
        let store = ResultStore::new(1);
        store.write(0, micros(1), LockMode::Unlocked).unwrap();
        assert_eq!(
            store.write(0, micros(2), LockMode::Unlocked),
            Err(StoreError::SlotAlreadyWritten { index: 0 })
        );
        assert_eq!(
            store.write(0, micros(3), LockMode::Locked),
            Err(StoreError::SlotAlreadyWritten { index: 0 })
        );
        assert_eq!(store.get(0), Some(micros(1)));
    }

    #[test]
    fn test_zero_timing_counts_as_written() {
        let store = ResultStore::new(1);
        store.write(0, TimingResult::ZERO, LockMode::Locked).unwrap();
        assert_eq!(store.get(0), Some(TimingResult::ZERO));
        assert!(store.is_complete());
    }

    #[test]
    fn test_get_empty_and_out_of_range() {
        let store = ResultStore::new(2);
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(9), None);
    }

    #[test]
    fn test_concurrent_disjoint_writes_fill_every_slot() {
        for mode in [LockMode::Locked, LockMode::Unlocked] {
            let store = Arc::new(ResultStore::new(64));
            let handles: Vec<_> = (0..4)
                .map(|worker| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || {
                        for index in (worker * 16)..(worker * 16 + 16) {
                            store.write(index, micros(index as u64), mode).unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let exported = store.export();
            assert_eq!(exported.len(), 64);
            for (index, timing) in exported.iter().enumerate() {
                assert_eq!(*timing, micros(index as u64), "mode {mode}, slot {index}");
            }
        }
    }

    #[test]
    fn test_lock_mode_labels() {
        assert_eq!(LockMode::from_enabled(true), LockMode::Locked);
        assert_eq!(LockMode::from_enabled(false), LockMode::Unlocked);
        assert_eq!(LockMode::Locked.to_string(), "enabled");
        assert_eq!(LockMode::Unlocked.to_string(), "disabled");
        assert!(LockMode::default().is_locked());
    }
}

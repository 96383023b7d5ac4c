//! Collatz sequence walking and per-item wall-clock timing.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Wall-clock time spent walking one Collatz sequence down to 1, in fractional seconds.
///
/// Always finite and non-negative: the only way to build one is from a [`Duration`].
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct TimingResult(f64);

impl TimingResult {
    /// A zero-length timing; the value of any slot that was never written.
    pub const ZERO: TimingResult = TimingResult(0.0);

    pub fn from_duration(elapsed: Duration) -> Self {
        Self(elapsed.as_secs_f64())
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Raw bit pattern, used by the store's atomic slots.
    pub(crate) fn to_bits(self) -> u64 {
        self.0.to_bits()
    }

    pub(crate) fn from_bits(bits: u64) -> Self {
        Self(f64::from_bits(bits))
    }
}

impl From<Duration> for TimingResult {
    fn from(elapsed: Duration) -> Self {
        Self::from_duration(elapsed)
    }
}

impl fmt::Display for TimingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One timed walk: the item, how many steps it took to reach 1, and how long that took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceSample {
    pub item: u64,
    pub steps: u64,
    pub elapsed: TimingResult,
}

/// Count the Collatz steps needed to bring `n` down to 1.
///
/// ## Parameters
/// - `n`: the starting value; expected to be at least 1.
///
/// ## Returns
/// - (`u64`): number of `n/2` or `3n+1` transformations applied; `0` for `n == 1`.
///
/// ## Notes
/// - The walk runs on `u128`, so `3n + 1` cannot overflow for any `u64` start that reaches 1.
/// - There is no step bound. Termination is assumed (the Collatz conjecture holds for every tested range).
/// - `n == 0` is outside the domain and returns `0` rather than spinning on `0 / 2`.
pub fn collatz_steps(n: u64) -> u64 {
    let mut value = u128::from(n);
    let mut steps = 0;
    while value > 1 {
        value = if value % 2 == 1 { 3 * value + 1 } else { value / 2 };
        steps += 1;
    }
    steps
}

/// Walk the sequence for `n` and measure only the walk itself.
pub fn sample_sequence(n: u64) -> SequenceSample {
    let started = Instant::now();
    let steps = collatz_steps(black_box(n));
    let elapsed = started.elapsed();
    SequenceSample {
        item: n,
        steps: black_box(steps),
        elapsed: TimingResult::from_duration(elapsed),
    }
}

/// Time the Collatz walk for `n`; the value every worker records per item.
pub fn time_sequence(n: u64) -> TimingResult {
    sample_sequence(n).elapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_for_one_is_zero() {
        assert_eq!(collatz_steps(1), 0);
    }

    #[test]
    fn test_steps_known_values() {
        // 6 → 3 → 10 → 5 → 16 → 8 → 4 → 2 → 1
        assert_eq!(collatz_steps(6), 8);
        assert_eq!(collatz_steps(2), 1);
        assert_eq!(collatz_steps(7), 16);
        assert_eq!(collatz_steps(27), 111);
        assert_eq!(collatz_steps(97), 118);
    }

    #[test]
    fn test_steps_zero_does_not_spin() {
        assert_eq!(collatz_steps(0), 0);
    }

    #[test]
    fn test_steps_survive_values_past_u32() {
        // 3n + 1 on this start exceeds u32::MAX on the first step
        let start = u64::from(u32::MAX);
        assert!(collatz_steps(start) > 0);
    }

    #[test]
    fn test_sample_reports_item_and_steps() {
        let sample = sample_sequence(27);
        assert_eq!(sample.item, 27);
        assert_eq!(sample.steps, 111);
        assert!(sample.elapsed.as_secs_f64() >= 0.0);
    }

    #[test]
    fn test_repeated_timing_is_non_negative() {
        for n in 1..=200 {
            for _ in 0..3 {
                let timing = time_sequence(n);
                assert!(timing.as_secs_f64() >= 0.0);
                assert!(timing.as_secs_f64().is_finite());
            }
        }
    }

    #[test]
    fn test_timing_bits_round_trip() {
        let timing = TimingResult::from_duration(Duration::from_nanos(1_250));
        assert_eq!(TimingResult::from_bits(timing.to_bits()), timing);
    }

    #[test]
    fn test_timing_display_is_plain_decimal() {
        let timing = TimingResult::from_duration(Duration::from_micros(1_500));
        assert_eq!(timing.to_string(), "0.0015");
        assert_eq!(TimingResult::ZERO.to_string(), "0");
    }
}

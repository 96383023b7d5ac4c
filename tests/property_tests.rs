//! Property-based tests for configuration normalization
//!
//! These use proptest to check that any requested (N, T) pair either short-circuits (N <= 0) or yields a
//! worker count the partitioner accepts.

use mt_collatz::Config;
use proptest::prelude::*;

proptest! {
    /// Property: N <= 0 never produces a configuration
    #[test]
    fn non_positive_total_is_empty(total in i64::MIN..=0, workers in any::<i64>()) {
        prop_assert!(Config::from_requested(total, workers).is_none());
    }

    /// Property: the normalized worker count always lies in 1..=N
    #[test]
    fn workers_are_clamped(total in 1i64..100_000, workers in any::<i64>()) {
        let config = Config::from_requested(total, workers).unwrap();
        prop_assert_eq!(config.total as i64, total);
        prop_assert!(config.workers >= 1);
        prop_assert!(config.workers <= config.total);
        if (1..=total).contains(&workers) {
            prop_assert_eq!(config.workers as i64, workers);
        }
    }

    /// Property: normalized configurations partition cleanly
    #[test]
    fn normalized_config_partitions(total in 1i64..2_000, workers in -10i64..3_000) {
        let config = Config::from_requested(total, workers).unwrap();
        let ranges = collatz_core::partition(config.total, config.workers);
        prop_assert_eq!(ranges.len(), config.workers);
        prop_assert_eq!(collatz_core::verify_disjoint_cover(&ranges, config.total), Ok(()));
    }
}

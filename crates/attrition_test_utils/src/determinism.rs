//! Determinism testing utilities.
//!
//! Provides a harness for verifying that resolving the same battle always
//! produces bit-identical outcome vectors.
//!
//! # Testing Strategy
//!
//! The engine is exact, so repeated runs must agree to the last bit.
//! Sources of non-determinism it guards against include:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized, and
//!   float addition is not associative. Transition rows use ordered maps.
//!
//! - **Thread scheduling**: Sweeps resolve battles on several
//!   threads at once; each battle must still be self-contained.

use std::thread;

use attrition_core::battle::Battle;
use attrition_core::error::Result;
use attrition_core::outcome::Outcome;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical outcome vectors.
    pub is_deterministic: bool,
    /// Bit patterns of each run's outcome vector.
    pub fingerprints: Vec<Vec<u64>>,
}

impl DeterminismResult {
    /// Number of distinct outcome vectors seen (should be 1).
    #[must_use]
    pub fn unique_fingerprints(&self) -> usize {
        let mut unique = self.fingerprints.clone();
        unique.sort_unstable();
        unique.dedup();
        unique.len()
    }

    /// Assert that every run agreed, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different outcome vectors.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            panic!(
                "Battle resolution is non-deterministic!\n\
                 Runs: {}\n\
                 Unique outcomes: {} (expected 1)",
                self.fingerprints.len(),
                self.unique_fingerprints()
            );
        }
    }
}

/// Bit pattern of an outcome vector, for exact comparison.
#[must_use]
pub fn fingerprint(outcome: &Outcome) -> Vec<u64> {
    outcome.probabilities().iter().map(|p| p.to_bits()).collect()
}

/// Resolve a battle `runs` times in sequence and compare the results.
///
/// # Errors
///
/// Propagates the first resolution error.
pub fn verify_determinism(battle: &Battle, runs: usize) -> Result<DeterminismResult> {
    let fingerprints = (0..runs)
        .map(|_| battle.resolve().map(|o| fingerprint(&o)))
        .collect::<Result<Vec<_>>>()?;

    Ok(summarise(fingerprints))
}

/// Resolve a battle on `threads` scoped threads at once and compare.
///
/// # Errors
///
/// Propagates the first resolution error.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn verify_parallel_determinism(battle: &Battle, threads: usize) -> Result<DeterminismResult> {
    let results: Vec<Result<Vec<u64>>> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| s.spawn(|| battle.resolve().map(|o| fingerprint(&o))))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("resolution thread panicked"))
            .collect()
    });

    let fingerprints = results.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(summarise(fingerprints))
}

fn summarise(fingerprints: Vec<Vec<u64>>) -> DeterminismResult {
    let is_deterministic = fingerprints.windows(2).all(|w| w[0] == w[1]);
    if !is_deterministic {
        tracing::warn!(runs = fingerprints.len(), "Outcome vectors diverged");
    }
    DeterminismResult {
        is_deterministic,
        fingerprints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{garrison, strike_group};

    #[test]
    fn test_sequential_runs_match() {
        let battle = Battle::new(strike_group(), garrison());
        let result = verify_determinism(&battle, 3).unwrap();
        result.assert_deterministic();
        assert_eq!(result.unique_fingerprints(), 1);
    }

    #[test]
    fn test_parallel_runs_match() {
        let battle = Battle::new(strike_group(), garrison());
        verify_parallel_determinism(&battle, 4)
            .unwrap()
            .assert_deterministic();
    }

    #[test]
    fn test_divergence_is_reported() {
        let result = summarise(vec![vec![1, 2], vec![1, 3]]);
        assert!(!result.is_deterministic);
        assert_eq!(result.unique_fingerprints(), 2);
    }
}

//! Test fixtures and helpers.
//!
//! Named forces and tolerance assertions for consistent testing.

use attrition_core::unit::{Force, UnitType};

/// Default tolerance for probability comparisons.
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// A force of `n` infantry.
#[must_use]
pub fn infantry(n: u32) -> Force {
    Force::only(UnitType::Infantry, n)
}

/// A force of `n` tanks.
#[must_use]
pub fn tanks(n: u32) -> Force {
    Force::only(UnitType::Tank, n)
}

/// Paired infantry and artillery, `n` of each.
#[must_use]
pub fn combined_arms(n: u32) -> Force {
    Force::new([n, n, 0, 0, 0, 0])
}

/// A mixed air/ground strike force.
#[must_use]
pub fn strike_group() -> Force {
    Force::new([2, 1, 2, 1, 1, 1])
}

/// A typical entrenched defence.
#[must_use]
pub fn garrison() -> Force {
    Force::new([4, 1, 1, 1, 0, 0])
}

/// Install a test-friendly tracing subscriber (respects `RUST_LOG`).
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Assert two probabilities agree within `eps`.
///
/// # Panics
///
/// Panics if `|actual - expected| > eps`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() <= eps,
        "expected {expected}, got {actual} (|diff| = {} > {eps})",
        (actual - expected).abs()
    );
}

/// Assert a slice of probabilities sums to one within `eps`.
///
/// # Panics
///
/// Panics if the mass is off by more than `eps` or any entry is negative.
#[track_caller]
pub fn assert_distribution(probabilities: &[f64], eps: f64) {
    assert!(
        probabilities.iter().all(|&p| p >= 0.0),
        "negative probability in {probabilities:?}"
    );
    assert_close(probabilities.iter().sum(), 1.0, eps);
}

//! Error types for the resolution engine.

use thiserror::Error;

/// Result type alias using [`AttritionError`].
pub type Result<T> = std::result::Result<T, AttritionError>;

/// Top-level error type for the resolution engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttritionError {
    /// A force composition could not be parsed or validated.
    #[error("Invalid force composition '{input}': {reason}")]
    InvalidComposition {
        /// The rejected input text.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The absorption distribution does not sum to one.
    ///
    /// This is an internal consistency failure: the transition matrix or its
    /// renormalization is broken, so the result must not be reported.
    #[error("Absorption distribution sums to {sum}, outside tolerance {tolerance}")]
    InconsistentDistribution {
        /// Total probability mass found.
        sum: f64,
        /// Allowed deviation from 1.
        tolerance: f64,
    },

    /// Power iteration did not settle within the iteration budget.
    #[error("Absorbing chain did not converge after {iterations} iterations")]
    NoConvergence {
        /// Iterations performed before giving up.
        iterations: usize,
    },
}

impl AttritionError {
    /// Shorthand for an [`AttritionError::InvalidComposition`].
    pub(crate) fn invalid_composition(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidComposition {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

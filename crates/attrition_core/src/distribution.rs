//! Exact hit-count distributions.
//!
//! The number of hits in one round is a sum of independent binomials, one
//! per dice tier. Each binomial is the coefficient list of the polynomial
//! `(q + p·x)^n`, and the total is the product of those polynomials.
//! Everything is computed by convolution; nothing is sampled.

use serde::{Deserialize, Serialize};

use crate::dice::DiceTiers;

/// Probability mass function over the number of hits scored in one round.
///
/// Index `k` holds `P(hits == k)` for `k` in `0..=max_hits()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitDistribution {
    pmf: Vec<f64>,
}

impl HitDistribution {
    /// Distribution of total hits for a tier vector.
    #[must_use]
    pub fn from_tiers(tiers: &DiceTiers) -> Self {
        let pmf = tiers
            .iter()
            .filter(|&(_, count)| count > 0)
            .map(|(tier, count)| binomial_pmf(count, tier.hit_probability()))
            .fold(vec![1.0], |acc, pmf| convolve(&acc, &pmf));

        Self { pmf }
    }

    /// Probability of scoring exactly `hits` hits (zero beyond the dice rolled).
    #[must_use]
    pub fn probability(&self, hits: usize) -> f64 {
        self.pmf.get(hits).copied().unwrap_or(0.0)
    }

    /// Largest number of hits with a defined probability.
    #[must_use]
    pub fn max_hits(&self) -> usize {
        self.pmf.len() - 1
    }

    /// Total probability mass.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.pmf.iter().sum()
    }

    /// The raw mass function.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.pmf
    }
}

/// Binomial mass function for `n` trials with success probability `p`.
///
/// Built one die at a time so no factorials or large powers are formed.
fn binomial_pmf(n: u32, p: f64) -> Vec<f64> {
    let q = 1.0 - p;
    let mut pmf = Vec::with_capacity(n as usize + 1);
    pmf.push(1.0);

    for _ in 0..n {
        pmf.push(0.0);
        for k in (1..pmf.len()).rev() {
            pmf[k] = pmf[k] * q + pmf[k - 1] * p;
        }
        pmf[0] *= q;
    }

    pmf
}

/// Discrete convolution (polynomial product) of two mass functions.
fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

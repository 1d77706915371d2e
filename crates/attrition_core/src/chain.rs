//! Absorbing Markov chain solver.
//!
//! The transition graph is expanded into a dense row-stochastic matrix. A
//! "nobody died this round" self-loop on a live state only delays the battle
//! without changing where it ends, so those loops are removed and the row
//! renormalised. Terminal states keep a pure self-loop. Power iteration from
//! the starting state then settles on the absorption distribution.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::error::{AttritionError, Result};
use crate::state_space::{CombatState, StateSpace, TransitionGraph};

/// Extra iterations allowed on top of the longest possible battle.
const ITERATION_MARGIN: usize = 64;

/// Tunables for the chain solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Stop once the L1 change between successive iterates is at most this.
    pub convergence_tolerance: f64,
    /// Allowed deviation of the final distribution's mass from 1.
    pub probability_tolerance: f64,
    /// Iteration budget. `None` derives it from the state space.
    pub max_iterations: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-12,
            probability_tolerance: 1e-10,
            max_iterations: None,
        }
    }
}

impl SolverConfig {
    /// Builder method to set the iteration budget.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Iteration budget for a given state space.
    ///
    /// Every transition off a live state removes at least one unit, so all
    /// mass is absorbed within `A + D` rounds.
    #[must_use]
    pub fn iteration_budget(&self, space: &StateSpace) -> usize {
        self.max_iterations.unwrap_or_else(|| {
            let longest = space.attacker_total() as usize + space.defender_total() as usize;
            longest + 2 + ITERATION_MARGIN
        })
    }
}

/// Dense row-major transition matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    size: usize,
    entries: Vec<f64>,
}

impl TransitionMatrix {
    /// Expand a transition graph (zero where there is no edge).
    #[must_use]
    pub fn from_graph(graph: &TransitionGraph) -> Self {
        let size = graph.space().len();
        let mut entries = vec![0.0; size * size];
        for from in 0..size {
            for (&to, &weight) in graph.row(from) {
                entries[from * size + to] = weight;
            }
        }
        Self { size, entries }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Entry at `(from, to)`.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.entries[from * self.size + to]
    }

    /// One row.
    #[must_use]
    pub fn row(&self, from: usize) -> &[f64] {
        &self.entries[from * self.size..(from + 1) * self.size]
    }

    fn row_mut(&mut self, from: usize) -> &mut [f64] {
        &mut self.entries[from * self.size..(from + 1) * self.size]
    }

    /// Whether a row keeps all of its mass on itself.
    #[must_use]
    pub fn is_absorbing(&self, index: usize) -> bool {
        let row = self.row(index);
        row[index] == row.iter().sum::<f64>()
    }

    /// Drop delaying self-loops and renormalise every row to sum to one.
    ///
    /// Absorbing rows become an exact self-loop of weight one.
    pub fn purge_self_loops(&mut self) {
        for index in 0..self.size {
            let absorbing = self.is_absorbing(index);
            let row = self.row_mut(index);
            if !absorbing {
                row[index] = 0.0;
            }
            let total: f64 = row.iter().sum();
            if total > 0.0 {
                for w in row.iter_mut() {
                    *w /= total;
                }
            }
        }
    }

    /// Post-multiply a row vector: `pi * T`.
    #[must_use]
    pub fn propagate(&self, pi: &[f64]) -> Vec<f64> {
        let mut next = vec![0.0; self.size];
        for (from, &mass) in pi.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            for (slot, &w) in next.iter_mut().zip(self.row(from)) {
                *slot += mass * w;
            }
        }
        next
    }
}

/// Long-run probability of settling in each combat state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Absorption {
    space: StateSpace,
    probabilities: Vec<f64>,
    iterations: usize,
}

impl Absorption {
    /// The state space the distribution is over.
    #[must_use]
    pub const fn space(&self) -> &StateSpace {
        &self.space
    }

    /// Probability per state, in state-index order.
    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Probability of ending in one state.
    #[must_use]
    pub fn probability(&self, state: CombatState) -> f64 {
        self.probabilities[self.space.index(state)]
    }

    /// Power iterations performed.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Total probability mass.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// States with non-zero mass, with their probability.
    pub fn support(&self) -> impl Iterator<Item = (CombatState, f64)> + '_ {
        self.probabilities
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != 0.0)
            .map(|(i, &p)| (self.space.state(i), p))
    }
}

/// The battle's absorbing chain, ready to solve.
#[derive(Debug, Clone)]
pub struct AbsorbingChain {
    space: StateSpace,
    matrix: TransitionMatrix,
}

impl AbsorbingChain {
    /// Build the purged, row-stochastic chain from a transition graph.
    #[must_use]
    pub fn from_graph(graph: &TransitionGraph) -> Self {
        let mut matrix = TransitionMatrix::from_graph(graph);
        matrix.purge_self_loops();
        Self {
            space: *graph.space(),
            matrix,
        }
    }

    /// The purged transition matrix.
    #[must_use]
    pub const fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    /// Iterate from the starting state until the distribution stops moving.
    ///
    /// # Errors
    ///
    /// - [`AttritionError::NoConvergence`] if the iteration budget runs out
    /// - [`AttritionError::InconsistentDistribution`] if the settled
    ///   distribution does not sum to one
    pub fn solve(&self, config: &SolverConfig) -> Result<Absorption> {
        let budget = config.iteration_budget(&self.space);
        let mut pi = vec![0.0; self.matrix.size()];
        pi[self.space.index(self.space.initial())] = 1.0;

        let mut iterations = 0;
        loop {
            if iterations >= budget {
                error!(iterations, "Absorbing chain failed to converge");
                return Err(AttritionError::NoConvergence { iterations });
            }

            let next = self.matrix.propagate(&pi);
            iterations += 1;

            let change: f64 = next.iter().zip(&pi).map(|(a, b)| (a - b).abs()).sum();
            trace!(iterations, change, "Propagated combat round");
            pi = next;

            if change <= config.convergence_tolerance {
                break;
            }
        }

        let sum: f64 = pi.iter().sum();
        if (sum - 1.0).abs() > config.probability_tolerance {
            error!(sum, "Absorption distribution lost probability mass");
            return Err(AttritionError::InconsistentDistribution {
                sum,
                tolerance: config.probability_tolerance,
            });
        }

        debug!(iterations, states = self.space.len(), "Absorbing chain converged");

        Ok(Absorption {
            space: self.space,
            probabilities: pi,
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{Force, UnitType};

    fn tank_vs_infantry() -> TransitionGraph {
        TransitionGraph::build(
            &Force::only(UnitType::Tank, 1),
            &Force::only(UnitType::Infantry, 1),
        )
    }

    #[test]
    fn test_purge_removes_live_self_loops() {
        let chain = AbsorbingChain::from_graph(&tank_vs_infantry());
        let m = chain.matrix();
        let start = 0;
        assert_eq!(m.get(start, start), 0.0);
        let row_sum: f64 = m.row(start).iter().sum();
        assert!((row_sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_purge_keeps_terminal_self_loops() {
        let graph = tank_vs_infantry();
        let chain = AbsorbingChain::from_graph(&graph);
        let space = graph.space();
        for state in space.states().filter(|s| s.is_terminal()) {
            let i = space.index(state);
            assert_eq!(chain.matrix().get(i, i), 1.0, "{state:?}");
            assert!(chain.matrix().is_absorbing(i));
        }
    }

    #[test]
    fn test_solve_tank_vs_infantry() {
        let graph = tank_vs_infantry();
        let absorption = AbsorbingChain::from_graph(&graph)
            .solve(&SolverConfig::default())
            .unwrap();

        let eps = 1e-12;
        assert!((absorption.probability(CombatState::new(1, 0)) - 0.5).abs() < eps);
        assert!((absorption.probability(CombatState::new(0, 1)) - 0.25).abs() < eps);
        assert!((absorption.probability(CombatState::new(0, 0)) - 0.25).abs() < eps);
        assert_eq!(absorption.probability(CombatState::new(1, 1)), 0.0);
        assert!((absorption.total_mass() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_solve_already_absorbed() {
        let graph = TransitionGraph::build(&Force::EMPTY, &Force::only(UnitType::Infantry, 3));
        let absorption = AbsorbingChain::from_graph(&graph)
            .solve(&SolverConfig::default())
            .unwrap();
        assert_eq!(absorption.iterations(), 1);
        assert_eq!(absorption.probability(CombatState::new(0, 3)), 1.0);
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let graph = TransitionGraph::build(
            &Force::only(UnitType::Infantry, 4),
            &Force::only(UnitType::Infantry, 4),
        );
        let config = SolverConfig::default().with_max_iterations(1);
        let err = AbsorbingChain::from_graph(&graph).solve(&config).unwrap_err();
        assert_eq!(err, AttritionError::NoConvergence { iterations: 1 });
    }

    #[test]
    fn test_mass_check_failure_is_reported() {
        let config = SolverConfig {
            probability_tolerance: -1.0,
            ..SolverConfig::default()
        };
        let err = AbsorbingChain::from_graph(&tank_vs_infantry())
            .solve(&config)
            .unwrap_err();
        match err {
            AttritionError::InconsistentDistribution { sum, tolerance } => {
                assert!((sum - 1.0).abs() < 1e-10);
                assert_eq!(tolerance, -1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_support_is_terminal_only() {
        let graph = TransitionGraph::build(
            &Force::new([2, 1, 1, 0, 0, 0]),
            &Force::new([3, 0, 0, 0, 0, 0]),
        );
        let absorption = AbsorbingChain::from_graph(&graph)
            .solve(&SolverConfig::default())
            .unwrap();
        for (state, p) in absorption.support() {
            assert!(state.is_terminal() || p < 1e-12, "{state:?} holds {p}");
        }
    }

    #[test]
    fn test_default_budget_covers_longest_battle() {
        let space = StateSpace::new(10, 7);
        let budget = SolverConfig::default().iteration_budget(&space);
        assert!(budget > 17);
    }
}

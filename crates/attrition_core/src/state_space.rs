//! Combat state space and one-round transition graph.
//!
//! A combat state is just `(attacker alive, defender alive)`. Casualties are
//! removed in a fixed order, so each alive-count maps to exactly one
//! composition and the state space stays `(A + 1) x (D + 1)` instead of
//! growing with the number of composition vectors.
//!
//! States are indexed so that index 0 is the full-strength starting state:
//!
//! ```text
//! index(a, d) = (A - a) * (D + 1) + (D - d)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::casualty::CasualtyLadder;
use crate::dice::dice_tiers;
use crate::distribution::HitDistribution;
use crate::unit::{Force, Role};

/// Units left alive on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatState {
    /// Attacking units alive.
    pub attacker: u32,
    /// Defending units alive.
    pub defender: u32,
}

impl CombatState {
    /// Create a new combat state.
    #[must_use]
    pub const fn new(attacker: u32, defender: u32) -> Self {
        Self { attacker, defender }
    }

    /// Whether combat is over (at least one side has no units).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.attacker == 0 || self.defender == 0
    }
}

/// Dense indexing of every `(a, d)` pair for a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpace {
    attacker_total: u32,
    defender_total: u32,
}

impl StateSpace {
    /// State space for forces of the given sizes.
    #[must_use]
    pub const fn new(attacker_total: u32, defender_total: u32) -> Self {
        Self {
            attacker_total,
            defender_total,
        }
    }

    /// Initial attacker size `A`.
    #[must_use]
    pub const fn attacker_total(&self) -> u32 {
        self.attacker_total
    }

    /// Initial defender size `D`.
    #[must_use]
    pub const fn defender_total(&self) -> u32 {
        self.defender_total
    }

    /// Number of states, `(A + 1) * (D + 1)`.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.attacker_total as usize + 1) * (self.defender_total as usize + 1)
    }

    /// Never true; the starting state always exists.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The full-strength starting state.
    #[must_use]
    pub const fn initial(&self) -> CombatState {
        CombatState::new(self.attacker_total, self.defender_total)
    }

    /// Dense index of a state.
    #[must_use]
    pub const fn index(&self, state: CombatState) -> usize {
        let row = (self.attacker_total - state.attacker) as usize;
        let col = (self.defender_total - state.defender) as usize;
        row * (self.defender_total as usize + 1) + col
    }

    /// State at a dense index.
    #[must_use]
    pub const fn state(&self, index: usize) -> CombatState {
        let width = self.defender_total as usize + 1;
        let row = (index / width) as u32;
        let col = (index % width) as u32;
        CombatState::new(self.attacker_total - row, self.defender_total - col)
    }

    /// Every state, in index order.
    pub fn states(&self) -> impl Iterator<Item = CombatState> + '_ {
        (0..self.len()).map(|i| self.state(i))
    }
}

/// Weighted directed graph of one-round transitions.
///
/// Built once per battle and read-only afterwards. Each row is kept in a
/// `BTreeMap` so iteration order (and therefore every float sum derived from
/// it) is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionGraph {
    space: StateSpace,
    rows: Vec<BTreeMap<usize, f64>>,
}

impl TransitionGraph {
    /// Build the transition graph for a battle.
    ///
    /// For every state the two sides roll simultaneously. Only hit pairs that
    /// fit within both sides' alive units become edges; each row is then
    /// normalised to sum to one.
    #[must_use]
    pub fn build(attacker: &Force, defender: &Force) -> Self {
        let attacker_ladder = CasualtyLadder::new(attacker, Role::Attacker);
        let defender_ladder = CasualtyLadder::new(defender, Role::Defender);
        let space = StateSpace::new(
            attacker_ladder.initial_total(),
            defender_ladder.initial_total(),
        );

        let attacker_hits = hit_distributions(&attacker_ladder);
        let defender_hits = hit_distributions(&defender_ladder);

        let rows: Vec<BTreeMap<usize, f64>> = space
            .states()
            .map(|state| {
                transitions_from(
                    &space,
                    state,
                    &attacker_hits[state.attacker as usize],
                    &defender_hits[state.defender as usize],
                )
            })
            .collect();

        let graph = Self { space, rows };

        debug!(
            attacker_total = space.attacker_total(),
            defender_total = space.defender_total(),
            states = space.len(),
            edges = graph.edge_count(),
            "Built transition graph"
        );

        if cfg!(feature = "debug-validation") {
            for state in space.states() {
                let sum = graph.row_sum(state);
                assert!((sum - 1.0).abs() < 1e-9, "row {state:?} sums to {sum}");
            }
        }

        graph
    }

    /// The state space this graph covers.
    #[must_use]
    pub const fn space(&self) -> &StateSpace {
        &self.space
    }

    /// Outgoing edges of a state as `(destination, weight)`, in index order.
    pub fn outgoing(&self, from: CombatState) -> impl Iterator<Item = (CombatState, f64)> + '_ {
        self.rows[self.space.index(from)]
            .iter()
            .map(|(&to, &w)| (self.space.state(to), w))
    }

    /// Outgoing edges of a state by dense index.
    pub(crate) fn row(&self, index: usize) -> &BTreeMap<usize, f64> {
        &self.rows[index]
    }

    /// Weight of the edge `from -> to` (zero if absent).
    #[must_use]
    pub fn weight(&self, from: CombatState, to: CombatState) -> f64 {
        self.rows[self.space.index(from)]
            .get(&self.space.index(to))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of a state's outgoing weights.
    #[must_use]
    pub fn row_sum(&self, from: CombatState) -> f64 {
        self.rows[self.space.index(from)].values().sum()
    }

    /// Total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(BTreeMap::len).sum()
    }
}

/// Hit distribution of a force at every alive-count, indexed by alive-count.
fn hit_distributions(ladder: &CasualtyLadder) -> Vec<HitDistribution> {
    (0..=ladder.initial_total())
        .map(|alive| {
            let force = ladder.with_alive(alive);
            HitDistribution::from_tiers(&dice_tiers(&force, ladder.role()))
        })
        .collect()
}

fn transitions_from(
    space: &StateSpace,
    state: CombatState,
    attacker_hits: &HitDistribution,
    defender_hits: &HitDistribution,
) -> BTreeMap<usize, f64> {
    let mut row = BTreeMap::new();

    // Pairs scoring more hits than the other side has units are dropped
    let attacker_range = attacker_hits.as_slice().iter().take(state.defender as usize + 1);
    for (defender_lost, &p_attacker) in attacker_range.enumerate() {
        let defender_range = defender_hits.as_slice().iter().take(state.attacker as usize + 1);
        for (attacker_lost, &p_defender) in defender_range.enumerate() {
            let next = CombatState::new(
                state.attacker - attacker_lost as u32,
                state.defender - defender_lost as u32,
            );
            *row.entry(space.index(next)).or_insert(0.0) += p_attacker * p_defender;
        }
    }

    let total: f64 = row.values().sum();
    for weight in row.values_mut() {
        *weight /= total;
    }

    row
}

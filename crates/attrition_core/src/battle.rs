//! Engine entry point.
//!
//! A [`Battle`] pairs two forces with solver settings. Resolving it runs the
//! whole pipeline: transition graph, absorbing chain, outcome extraction.
//! Nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::chain::{AbsorbingChain, SolverConfig};
use crate::error::Result;
use crate::outcome::Outcome;
use crate::state_space::TransitionGraph;
use crate::unit::Force;

/// One battle between an attacking and a defending force.
///
/// # Example
///
/// ```
/// use attrition_core::battle::Battle;
/// use attrition_core::unit::{Force, UnitType};
///
/// let outcome = Battle::new(
///     Force::only(UnitType::Tank, 1),
///     Force::only(UnitType::Infantry, 1),
/// )
/// .resolve()
/// .unwrap();
///
/// assert_eq!(outcome.len(), 3);
/// assert!((outcome.attacker_win_probability() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    attacker: Force,
    defender: Force,
    #[serde(default)]
    config: SolverConfig,
}

impl Battle {
    /// Create a battle with default solver settings.
    #[must_use]
    pub fn new(attacker: Force, defender: Force) -> Self {
        Self {
            attacker,
            defender,
            config: SolverConfig::default(),
        }
    }

    /// Builder method to override solver settings.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The attacking force at full strength.
    #[must_use]
    pub const fn attacker(&self) -> &Force {
        &self.attacker
    }

    /// The defending force at full strength.
    #[must_use]
    pub const fn defender(&self) -> &Force {
        &self.defender
    }

    /// Solver settings in use.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute the full outcome distribution.
    ///
    /// # Errors
    ///
    /// Fails only on internal consistency problems in the chain solver; see
    /// [`AbsorbingChain::solve`].
    pub fn resolve(&self) -> Result<Outcome> {
        let _span = info_span!(
            "resolve",
            attacker = %self.attacker,
            defender = %self.defender
        )
        .entered();

        let graph = TransitionGraph::build(&self.attacker, &self.defender);
        let absorption = AbsorbingChain::from_graph(&graph).solve(&self.config)?;
        let outcome = Outcome::from_absorption(&absorption);

        debug!(
            outcomes = outcome.len(),
            attacker_wins = outcome.attacker_win_probability(),
            "Battle resolved"
        );

        Ok(outcome)
    }
}

/// Resolve a battle with default solver settings.
///
/// # Errors
///
/// See [`Battle::resolve`].
pub fn run_battle(attacker: &Force, defender: &Force) -> Result<Outcome> {
    Battle::new(*attacker, *defender).resolve()
}

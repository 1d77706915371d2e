//! # Attrition Core
//!
//! Exact outcome distributions for multi-round dice battles between two
//! forces of heterogeneous units.
//!
//! This crate contains **only** the probability engine:
//! - No rendering
//! - No IO
//! - No randomness (every distribution is computed, never sampled)
//!
//! ## Pipeline
//!
//! 1. [`dice`] - sort a force's dice into hit-probability tiers
//! 2. [`distribution`] - exact hit-count distribution for one round
//! 3. [`casualty`] - fixed-order casualty removal
//! 4. [`state_space`] - `(attacker alive, defender alive)` states and one-round transitions
//! 5. [`chain`] - absorbing Markov chain solver
//! 6. [`outcome`] - dense outcome vector and win probability
//!
//! [`battle`] wires the stages together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod battle;
pub mod casualty;
pub mod chain;
pub mod dice;
pub mod distribution;
pub mod error;
pub mod outcome;
pub mod state_space;
pub mod unit;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battle::{run_battle, Battle};
    pub use crate::casualty::{take_casualties, CasualtyLadder};
    pub use crate::chain::{AbsorbingChain, Absorption, SolverConfig, TransitionMatrix};
    pub use crate::dice::{dice_tiers, DiceTier, DiceTiers};
    pub use crate::distribution::HitDistribution;
    pub use crate::error::{AttritionError, Result};
    pub use crate::outcome::{Outcome, OutcomeKind};
    pub use crate::state_space::{CombatState, StateSpace, TransitionGraph};
    pub use crate::unit::{Force, Role, UnitType};
}

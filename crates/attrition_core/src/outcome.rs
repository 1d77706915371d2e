//! Outcome extraction.
//!
//! Repackages the sparse absorption distribution into a dense vector of
//! length `A + D + 1`, ordered from "attacker keeps everything" to
//! "defender keeps everything":
//!
//! ```text
//! index:   0      1     ...  A-1    A     A+1   ...  A+D
//! means:  att A  att A-1 ... att 1  none  def 1 ...  def D
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chain::Absorption;

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// The attacker holds the field with this many units.
    AttackerSurvives(u32),
    /// Both forces were destroyed.
    NoSurvivors,
    /// The defender holds the field with this many units.
    DefenderSurvives(u32),
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttackerSurvives(n) => write!(f, "Attacker survives with {n} units"),
            Self::NoSurvivors => f.write_str("No survivors"),
            Self::DefenderSurvives(n) => write!(f, "Defender survives with {n} units"),
        }
    }
}

/// Dense distribution over battle endings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    probabilities: Vec<f64>,
    middle: usize,
}

impl Outcome {
    /// Project an absorption distribution onto the ordered outcome vector.
    ///
    /// Only terminal states carry mass after convergence; anything left on a
    /// live state is below the solver tolerance and is dropped.
    #[must_use]
    pub fn from_absorption(absorption: &Absorption) -> Self {
        let space = absorption.space();
        let attacker_total = space.attacker_total() as usize;
        let middle = attacker_total;
        let mut probabilities = vec![0.0; attacker_total + space.defender_total() as usize + 1];

        for (state, p) in absorption.support() {
            let index = if state.defender == 0 {
                attacker_total - state.attacker as usize
            } else if state.attacker == 0 {
                middle + state.defender as usize
            } else {
                continue;
            };
            probabilities[index] += p;
        }

        Self {
            probabilities,
            middle,
        }
    }

    /// Probability per outcome index.
    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Index of the "no survivors" outcome; it separates attacker-favoured
    /// outcomes (below) from defender-favoured ones (above).
    #[must_use]
    pub const fn middle_index(&self) -> usize {
        self.middle
    }

    /// Number of distinct outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Never true; "no survivors" is always an outcome.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Initial attacker size.
    #[must_use]
    pub const fn attacker_total(&self) -> u32 {
        self.middle as u32
    }

    /// Initial defender size.
    #[must_use]
    pub fn defender_total(&self) -> u32 {
        (self.probabilities.len() - self.middle - 1) as u32
    }

    /// Probability of a successful attack (attacker survives with any units).
    #[must_use]
    pub fn attacker_win_probability(&self) -> f64 {
        self.probabilities[..self.middle].iter().sum()
    }

    /// Probability the defender holds with at least one unit.
    #[must_use]
    pub fn defender_win_probability(&self) -> f64 {
        self.probabilities[self.middle + 1..].iter().sum()
    }

    /// Probability both forces are wiped out.
    #[must_use]
    pub fn mutual_destruction_probability(&self) -> f64 {
        self.probabilities[self.middle]
    }

    /// Expected attacking units left standing.
    #[must_use]
    pub fn expected_attacker_survivors(&self) -> f64 {
        self.outcomes()
            .map(|(kind, p)| match kind {
                OutcomeKind::AttackerSurvives(n) => f64::from(n) * p,
                _ => 0.0,
            })
            .sum()
    }

    /// Expected defending units left standing.
    #[must_use]
    pub fn expected_defender_survivors(&self) -> f64 {
        self.outcomes()
            .map(|(kind, p)| match kind {
                OutcomeKind::DefenderSurvives(n) => f64::from(n) * p,
                _ => 0.0,
            })
            .sum()
    }

    /// What the outcome at `index` means.
    #[must_use]
    pub fn kind_at(&self, index: usize) -> OutcomeKind {
        match index.cmp(&self.middle) {
            Ordering::Less => OutcomeKind::AttackerSurvives((self.middle - index) as u32),
            Ordering::Equal => OutcomeKind::NoSurvivors,
            Ordering::Greater => OutcomeKind::DefenderSurvives((index - self.middle) as u32),
        }
    }

    /// Probability of one particular ending (zero if out of range).
    #[must_use]
    pub fn probability_of(&self, kind: OutcomeKind) -> f64 {
        let index = match kind {
            OutcomeKind::AttackerSurvives(n) if n > 0 => self.middle.checked_sub(n as usize),
            OutcomeKind::NoSurvivors => Some(self.middle),
            OutcomeKind::DefenderSurvives(n) if n > 0 => Some(self.middle + n as usize),
            _ => None,
        };
        index
            .and_then(|i| self.probabilities.get(i).copied())
            .unwrap_or(0.0)
    }

    /// Every outcome with its probability, in index order.
    pub fn outcomes(&self) -> impl Iterator<Item = (OutcomeKind, f64)> + '_ {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| (self.kind_at(i), p))
    }
}

//! Unit types, combat roles and force compositions.
//!
//! A [`Force`] is a fixed-length count vector over the six [`UnitType`]s in
//! canonical order. Counts are unsigned, so a composition that reaches the
//! engine is valid by construction; textual input is checked by
//! [`Force::from_str`](std::str::FromStr) at the boundary.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AttritionError, Result};

/// Number of unit types a force is made of.
pub const UNIT_TYPE_COUNT: usize = 6;

/// The closed set of unit types, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    /// Cheap ground unit.
    Infantry,
    /// Ground support; boosts infantry when attacking.
    Artillery,
    /// Armoured ground unit.
    Tank,
    /// Air superiority unit.
    Fighter,
    /// Air support; boosted alongside tanks and fighters when attacking.
    TacticalBomber,
    /// Long range bomber.
    StrategicBomber,
}

impl UnitType {
    /// All unit types in canonical order.
    pub const ALL: [Self; UNIT_TYPE_COUNT] = [
        Self::Infantry,
        Self::Artillery,
        Self::Tank,
        Self::Fighter,
        Self::TacticalBomber,
        Self::StrategicBomber,
    ];

    /// Position of this type in a composition vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Infantry => 0,
            Self::Artillery => 1,
            Self::Tank => 2,
            Self::Fighter => 3,
            Self::TacticalBomber => 4,
            Self::StrategicBomber => 5,
        }
    }
}

/// Which side of the battle a force fights on.
///
/// The role selects both the dice table and the casualty-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The side initiating combat.
    Attacker,
    /// The side holding the territory.
    Defender,
}

/// Unit counts for one side, indexed by [`UnitType`].
///
/// # Example
///
/// ```
/// use attrition_core::unit::{Force, UnitType};
///
/// let force: Force = "2,2,0,0,0,0".parse().unwrap();
/// assert_eq!(force[UnitType::Artillery], 2);
/// assert_eq!(force.total(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Force([u32; UNIT_TYPE_COUNT]);

impl Force {
    /// A force with no units.
    pub const EMPTY: Self = Self([0; UNIT_TYPE_COUNT]);

    /// Create a force from counts in canonical order.
    #[must_use]
    pub const fn new(counts: [u32; UNIT_TYPE_COUNT]) -> Self {
        Self(counts)
    }

    /// Create a force holding `count` units of a single type.
    #[must_use]
    pub fn only(unit: UnitType, count: u32) -> Self {
        Self::EMPTY.with(unit, count)
    }

    /// Builder method to set the count of one unit type.
    #[must_use]
    pub fn with(mut self, unit: UnitType, count: u32) -> Self {
        self.0[unit.index()] = count;
        self
    }

    /// Raw counts in canonical order.
    #[must_use]
    pub const fn counts(&self) -> [u32; UNIT_TYPE_COUNT] {
        self.0
    }

    /// Number of units of one type.
    #[must_use]
    pub const fn count(&self, unit: UnitType) -> u32 {
        self.0[unit.index()]
    }

    /// Total number of units.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Whether the force has no units left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Multiply every count by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: u32) -> Self {
        Self(self.0.map(|n| n.saturating_mul(factor)))
    }

    /// Remove up to `count` units of one type, returning how many were removed.
    pub(crate) fn remove(&mut self, unit: UnitType, count: u32) -> u32 {
        let slot = &mut self.0[unit.index()];
        let removed = count.min(*slot);
        *slot -= removed;
        removed
    }
}

impl From<[u32; UNIT_TYPE_COUNT]> for Force {
    fn from(counts: [u32; UNIT_TYPE_COUNT]) -> Self {
        Self(counts)
    }
}

impl Index<UnitType> for Force {
    type Output = u32;

    fn index(&self, unit: UnitType) -> &u32 {
        &self.0[unit.index()]
    }
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl FromStr for Force {
    type Err = AttritionError;

    /// Parse six counts separated by commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.len() != UNIT_TYPE_COUNT {
            return Err(AttritionError::invalid_composition(
                s,
                format!(
                    "expected {UNIT_TYPE_COUNT} unit counts, found {}",
                    tokens.len()
                ),
            ));
        }

        let mut counts = [0u32; UNIT_TYPE_COUNT];
        for (slot, token) in counts.iter_mut().zip(&tokens) {
            *slot = token.parse().map_err(|_| {
                AttritionError::invalid_composition(
                    s,
                    format!("'{token}' is not a non-negative integer"),
                )
            })?;
        }

        Ok(Self(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, unit) in UnitType::ALL.iter().enumerate() {
            assert_eq!(unit.index(), i);
        }
    }

    #[test]
    fn test_parse_comma_and_whitespace() {
        let a: Force = "0,0,3,0,0,0".parse().unwrap();
        let b: Force = " 0 0 3 0 0 0 ".parse().unwrap();
        let c: Force = "0, 0, 3, 0, 0, 0".parse().unwrap();
        assert_eq!(a, Force::only(UnitType::Tank, 3));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        let err = "1,2,3".parse::<Force>().unwrap_err();
        assert!(matches!(err, AttritionError::InvalidComposition { .. }));
    }

    #[test]
    fn test_parse_rejects_negative_and_fractional() {
        assert!("1,-1,0,0,0,0".parse::<Force>().is_err());
        assert!("1,1.5,0,0,0,0".parse::<Force>().is_err());
        assert!("a,0,0,0,0,0".parse::<Force>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let force = Force::new([1, 2, 3, 4, 5, 6]);
        assert_eq!(force.to_string(), "1,2,3,4,5,6");
        assert_eq!(force.to_string().parse::<Force>().unwrap(), force);
    }

    #[test]
    fn test_remove_never_underflows() {
        let mut force = Force::only(UnitType::Fighter, 2);
        assert_eq!(force.remove(UnitType::Fighter, 5), 2);
        assert_eq!(force.count(UnitType::Fighter), 0);
        assert_eq!(force.remove(UnitType::Infantry, 1), 0);
        assert!(force.is_empty());
    }

    #[test]
    fn test_scaled() {
        let force = Force::new([1, 1, 0, 0, 0, 0]).scaled(3);
        assert_eq!(force.counts(), [3, 3, 0, 0, 0, 0]);
        assert_eq!(Force::EMPTY.scaled(10), Force::EMPTY);
    }
}

//! Casualty assignment.
//!
//! Losses are removed greedily in a fixed, role-specific priority order.
//! Removal is a total function of units lost, so a force's composition is
//! fully determined by how many units it still has alive.

use crate::unit::{Force, Role, UnitType};

/// Removal order for losses taken by the attacker.
pub const ATTACKER_CASUALTY_ORDER: [UnitType; 6] = [
    UnitType::StrategicBomber,
    UnitType::TacticalBomber,
    UnitType::Fighter,
    UnitType::Tank,
    UnitType::Artillery,
    UnitType::Infantry,
];

/// Removal order for losses taken by the defender.
pub const DEFENDER_CASUALTY_ORDER: [UnitType; 6] = [
    UnitType::Fighter,
    UnitType::TacticalBomber,
    UnitType::Tank,
    UnitType::Artillery,
    UnitType::Infantry,
    UnitType::StrategicBomber,
];

/// Priority order used when `role` absorbs losses.
#[must_use]
pub const fn casualty_order(role: Role) -> &'static [UnitType; 6] {
    match role {
        Role::Attacker => &ATTACKER_CASUALTY_ORDER,
        Role::Defender => &DEFENDER_CASUALTY_ORDER,
    }
}

/// Remove `hits` units from a force belonging to `role`.
///
/// Hits beyond the force's size are absorbed with no effect.
#[must_use]
pub fn take_casualties(force: &Force, hits: u32, role: Role) -> Force {
    let mut reduced = *force;
    let mut remaining = hits;

    for &unit in casualty_order(role) {
        if remaining == 0 {
            break;
        }
        remaining -= reduced.remove(unit, remaining);
    }

    reduced
}

/// Compositions of one force after every possible number of losses.
///
/// `ladder.after_losses(k)` is `take_casualties(initial, k, role)`, computed
/// once per loss count instead of once per transition edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasualtyLadder {
    role: Role,
    rungs: Vec<Force>,
}

impl CasualtyLadder {
    /// Build the ladder for a full-strength force.
    #[must_use]
    pub fn new(initial: &Force, role: Role) -> Self {
        let total = initial.total();
        let rungs = (0..=total)
            .map(|lost| take_casualties(initial, lost, role))
            .collect();
        Self { role, rungs }
    }

    /// Role whose priority order built the ladder.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Units in the full-strength force.
    #[must_use]
    pub fn initial_total(&self) -> u32 {
        self.rungs.len() as u32 - 1
    }

    /// Composition after `lost` casualties (empty once all units are gone).
    #[must_use]
    pub fn after_losses(&self, lost: u32) -> Force {
        self.rungs
            .get(lost as usize)
            .copied()
            .unwrap_or(Force::EMPTY)
    }

    /// Composition when `alive` units remain.
    #[must_use]
    pub fn with_alive(&self, alive: u32) -> Force {
        self.after_losses(self.initial_total().saturating_sub(alive))
    }
}

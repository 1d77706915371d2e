//! Dice-tier aggregation.
//!
//! Every unit rolls exactly one die per round. Before resolving hits, a force
//! is sorted into four tiers by hit probability:
//! - 1/6, 1/3, 1/2 and 2/3
//!
//! Attackers get support bonuses (artillery lifts infantry, tactical bombers
//! pair with tanks and fighters). Defenders use a flat table.

use serde::{Deserialize, Serialize};

use crate::unit::{Force, Role, UnitType};

/// Number of hit-probability tiers.
pub const TIER_COUNT: usize = 4;

/// A hit-probability bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceTier {
    /// Hits on a 1.
    OneSixth,
    /// Hits on 1-2.
    OneThird,
    /// Hits on 1-3.
    OneHalf,
    /// Hits on 1-4.
    TwoThirds,
}

impl DiceTier {
    /// All tiers, weakest first.
    pub const ALL: [Self; TIER_COUNT] = [
        Self::OneSixth,
        Self::OneThird,
        Self::OneHalf,
        Self::TwoThirds,
    ];

    /// Probability that a single die in this tier scores a hit.
    #[must_use]
    pub fn hit_probability(self) -> f64 {
        f64::from(self.pips()) / 6.0
    }

    /// Number of faces (out of six) that score a hit.
    #[must_use]
    pub const fn pips(self) -> u32 {
        match self {
            Self::OneSixth => 1,
            Self::OneThird => 2,
            Self::OneHalf => 3,
            Self::TwoThirds => 4,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::OneSixth => 0,
            Self::OneThird => 1,
            Self::OneHalf => 2,
            Self::TwoThirds => 3,
        }
    }
}

/// Dice counts per tier, weakest tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceTiers([u32; TIER_COUNT]);

impl DiceTiers {
    /// Create a tier vector from counts ordered 1/6, 1/3, 1/2, 2/3.
    #[must_use]
    pub const fn new(counts: [u32; TIER_COUNT]) -> Self {
        Self(counts)
    }

    /// Raw counts, weakest tier first.
    #[must_use]
    pub const fn counts(&self) -> [u32; TIER_COUNT] {
        self.0
    }

    /// Dice rolled in one tier.
    #[must_use]
    pub const fn count(&self, tier: DiceTier) -> u32 {
        self.0[tier.index()]
    }

    /// Total dice rolled.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Iterate `(tier, count)` pairs, weakest first.
    pub fn iter(&self) -> impl Iterator<Item = (DiceTier, u32)> + '_ {
        DiceTier::ALL.iter().map(|&tier| (tier, self.count(tier)))
    }
}

/// Sort a force's dice into hit-probability tiers.
///
/// Attacker:
/// - `min(tactical bombers, tanks + fighters)` dice are lifted from 1/2 to 2/3;
///   the rest of the tanks, fighters and tactical bombers roll at 1/2
/// - `min(artillery, infantry)` infantry are lifted from 1/6 to 1/3; the rest
///   roll at 1/6, artillery always rolls at 1/3
/// - strategic bombers always roll at 2/3
///
/// Defender (no support bonuses):
///
/// | Tier | Units |
/// |------|-------|
/// | 1/6  | strategic bombers |
/// | 1/3  | infantry + fighters |
/// | 1/2  | tactical bombers + tanks |
/// | 2/3  | artillery |
#[must_use]
pub fn dice_tiers(force: &Force, role: Role) -> DiceTiers {
    let infantry = force[UnitType::Infantry];
    let artillery = force[UnitType::Artillery];
    let tanks = force[UnitType::Tank];
    let fighters = force[UnitType::Fighter];
    let tactical = force[UnitType::TacticalBomber];
    let strategic = force[UnitType::StrategicBomber];

    match role {
        Role::Attacker => {
            let paired = tactical.min(tanks + fighters);
            let supported = artillery.min(infantry);
            DiceTiers([
                infantry - supported,
                artillery + supported,
                tanks + fighters + tactical - paired,
                strategic + paired,
            ])
        }
        Role::Defender => DiceTiers([
            strategic,
            infantry + fighters,
            tactical + tanks,
            artillery,
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_probabilities() {
        assert!((DiceTier::OneSixth.hit_probability() - 1.0 / 6.0).abs() < 1e-15);
        assert!((DiceTier::OneThird.hit_probability() - 1.0 / 3.0).abs() < 1e-15);
        assert!((DiceTier::OneHalf.hit_probability() - 0.5).abs() < 1e-15);
        assert!((DiceTier::TwoThirds.hit_probability() - 2.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_attacker_single_units() {
        let cases = [
            (UnitType::Infantry, [1, 0, 0, 0]),
            (UnitType::Artillery, [0, 1, 0, 0]),
            (UnitType::Tank, [0, 0, 1, 0]),
            (UnitType::Fighter, [0, 0, 1, 0]),
            (UnitType::TacticalBomber, [0, 0, 1, 0]),
            (UnitType::StrategicBomber, [0, 0, 0, 1]),
        ];
        for (unit, expected) in cases {
            let tiers = dice_tiers(&Force::only(unit, 1), Role::Attacker);
            assert_eq!(tiers.counts(), expected, "{unit:?}");
        }
    }

    #[test]
    fn test_defender_table() {
        let cases = [
            (UnitType::Infantry, [0, 1, 0, 0]),
            (UnitType::Artillery, [0, 0, 0, 1]),
            (UnitType::Tank, [0, 0, 1, 0]),
            (UnitType::Fighter, [0, 1, 0, 0]),
            (UnitType::TacticalBomber, [0, 0, 1, 0]),
            (UnitType::StrategicBomber, [1, 0, 0, 0]),
        ];
        for (unit, expected) in cases {
            let tiers = dice_tiers(&Force::only(unit, 1), Role::Defender);
            assert_eq!(tiers.counts(), expected, "{unit:?}");
        }
    }

    #[test]
    fn test_artillery_supports_infantry() {
        // 3 infantry, 2 artillery: two infantry lifted
        let tiers = dice_tiers(&Force::new([3, 2, 0, 0, 0, 0]), Role::Attacker);
        assert_eq!(tiers.counts(), [1, 4, 0, 0]);

        // More artillery than infantry: all infantry lifted
        let tiers = dice_tiers(&Force::new([1, 3, 0, 0, 0, 0]), Role::Attacker);
        assert_eq!(tiers.counts(), [0, 4, 0, 0]);
    }

    #[test]
    fn test_tactical_bomber_pairing() {
        // 2 tactical, 1 tank, 0 fighters: one pair
        let tiers = dice_tiers(&Force::new([0, 0, 1, 0, 2, 0]), Role::Attacker);
        assert_eq!(tiers.counts(), [0, 0, 2, 1]);

        // 1 tactical, 2 tanks, 1 fighter, 1 strategic
        let tiers = dice_tiers(&Force::new([0, 0, 2, 1, 1, 1]), Role::Attacker);
        assert_eq!(tiers.counts(), [0, 0, 3, 2]);
    }

    #[test]
    fn test_defender_never_boosted() {
        let force = Force::new([3, 2, 1, 1, 2, 0]);
        let tiers = dice_tiers(&force, Role::Defender);
        assert_eq!(tiers.counts(), [0, 4, 3, 2]);
    }

    #[test]
    fn test_one_die_per_unit() {
        let force = Force::new([4, 1, 3, 2, 5, 1]);
        assert_eq!(dice_tiers(&force, Role::Attacker).total(), force.total());
        assert_eq!(dice_tiers(&force, Role::Defender).total(), force.total());
    }

    #[test]
    fn test_empty_force_rolls_nothing() {
        assert_eq!(dice_tiers(&Force::EMPTY, Role::Attacker).total(), 0);
        assert_eq!(dice_tiers(&Force::EMPTY, Role::Defender).total(), 0);
    }
}

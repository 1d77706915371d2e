//! Proptest strategies for battle inputs.
//!
//! Force sizes are kept small so that every generated battle resolves in
//! milliseconds; the state space grows with the product of both sides.

use attrition_core::dice::DiceTiers;
use attrition_core::unit::{Force, UnitType};
use proptest::prelude::*;

/// A force with at most `max_per_type` units of each type.
pub fn arb_force(max_per_type: u32) -> impl Strategy<Value = Force> {
    proptest::array::uniform6(0..=max_per_type).prop_map(Force::new)
}

/// A force with at least one unit and at most `max_per_type` of each type.
pub fn arb_nonempty_force(max_per_type: u32) -> impl Strategy<Value = Force> {
    arb_force(max_per_type).prop_filter("force must have units", |f| !f.is_empty())
}

/// A small battle: two forces of up to two units per type.
pub fn arb_small_battle() -> impl Strategy<Value = (Force, Force)> {
    (arb_force(2), arb_force(2))
}

/// Any unit type.
pub fn arb_unit_type() -> impl Strategy<Value = UnitType> {
    proptest::sample::select(UnitType::ALL.to_vec())
}

/// A dice-tier vector with at most `max_per_tier` dice per tier.
pub fn arb_dice_tiers(max_per_tier: u32) -> impl Strategy<Value = DiceTiers> {
    proptest::array::uniform4(0..=max_per_tier).prop_map(DiceTiers::new)
}

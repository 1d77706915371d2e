//! Hand-checked battle scenarios.

use attrition_core::prelude::*;
use attrition_test_utils::determinism::{verify_determinism, verify_parallel_determinism};
use attrition_test_utils::fixtures::{
    assert_close, assert_distribution, combined_arms, garrison, infantry, init_tracing,
    strike_group, tanks,
};

#[test]
fn tank_against_infantry_matches_hand_computation() {
    init_tracing();

    // Tank attacks at 1/2, infantry defends at 1/3. A round where nobody is
    // hit is replayed, so condition on at least one hit:
    //   attacker only: 1/2 * 2/3 = 1/3
    //   defender only: 1/2 * 1/3 = 1/6
    //   both:          1/2 * 1/3 = 1/6
    let outcome = run_battle(&tanks(1), &infantry(1)).unwrap();
    let decisive = 1.0 / 3.0 + 1.0 / 6.0 + 1.0 / 6.0;

    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.middle_index(), 1);
    assert_close(outcome.probabilities()[0], (1.0 / 3.0) / decisive, 1e-12);
    assert_close(outcome.probabilities()[1], (1.0 / 6.0) / decisive, 1e-12);
    assert_close(outcome.probabilities()[2], (1.0 / 6.0) / decisive, 1e-12);
    assert_close(outcome.attacker_win_probability(), 0.5, 1e-12);
}

#[test]
fn empty_attacker_resolves_without_combat() {
    for k in 1..=5 {
        let outcome = run_battle(&Force::EMPTY, &infantry(k)).unwrap();
        assert_eq!(outcome.len(), k as usize + 1);
        assert_eq!(
            outcome.probability_of(OutcomeKind::DefenderSurvives(k)),
            1.0
        );
    }
}

#[test]
fn three_tanks_against_dug_in_defence() {
    init_tracing();

    let outcome = run_battle(&tanks(3), &Force::new([2, 2, 0, 0, 0, 0])).unwrap();
    assert_eq!(outcome.len(), 8);
    assert_eq!(outcome.middle_index(), 3);
    assert_distribution(outcome.probabilities(), 1e-10);

    // Four defenders at 1/3 or better against three attackers at 1/2
    assert!(outcome.defender_win_probability() > outcome.attacker_win_probability());
}

#[test]
fn tank_rush_odds_are_pinned() {
    // Three tanks against two infantry and two artillery
    let outcome = run_battle(&tanks(3), &Force::new([2, 2, 0, 0, 0, 0])).unwrap();
    assert_close(outcome.attacker_win_probability(), 0.206_494_332_753_665, 1e-9);
    assert_close(outcome.probabilities()[0], 0.011_699_492_716_818, 1e-9);
    assert_close(outcome.mutual_destruction_probability(), 0.050_217_501_404_165, 1e-9);
}

#[test]
fn overflowing_hits_do_not_count() {
    // Three tanks against one infantry. Rounds where the tanks would score
    // more hits than there are defenders are not part of the battle.
    let outcome = run_battle(&tanks(3), &infantry(1)).unwrap();
    assert_close(outcome.attacker_win_probability(), 139.0 / 140.0, 1e-10);
}

#[test]
fn overwhelming_force_nearly_always_wins() {
    let outcome = run_battle(&Force::only(UnitType::StrategicBomber, 12), &infantry(1)).unwrap();
    assert!(outcome.attacker_win_probability() > 0.99);
    // The infantry fires once per round, so most battles cost at most one bomber
    let cheap = outcome.probability_of(OutcomeKind::AttackerSurvives(12))
        + outcome.probability_of(OutcomeKind::AttackerSurvives(11));
    assert!(cheap > 0.99);
}

#[test]
fn artillery_support_improves_attack() {
    let without = run_battle(&Force::new([3, 0, 0, 0, 0, 0]), &infantry(3)).unwrap();
    let with = run_battle(&combined_arms(3), &infantry(3)).unwrap();
    assert!(with.attacker_win_probability() > without.attacker_win_probability());
}

#[test]
fn larger_garrison_holds_better() {
    let mut last = 1.0;
    for defenders in 1..=6 {
        let outcome = run_battle(&combined_arms(3), &infantry(defenders)).unwrap();
        assert_distribution(outcome.probabilities(), 1e-10);
        let p = outcome.attacker_win_probability();
        assert!(p <= last + 1e-9, "{defenders} defenders: {p} > {last}");
        last = p;
    }
}

#[test]
fn outcome_serialises_to_json() {
    let outcome = run_battle(&tanks(1), &infantry(1)).unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    let back: Outcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back.middle_index(), outcome.middle_index());
    assert_eq!(back.len(), outcome.len());
}

#[test]
fn mixed_battle_is_deterministic_across_runs_and_threads() {
    let battle = Battle::new(strike_group(), garrison());

    let sequential = verify_determinism(&battle, 4).unwrap();
    sequential.assert_deterministic();

    let threaded = verify_parallel_determinism(&battle, 4).unwrap();
    threaded.assert_deterministic();
    assert_eq!(threaded.fingerprints[0], sequential.fingerprints[0]);
}

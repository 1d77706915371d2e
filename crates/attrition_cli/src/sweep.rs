//! Scenario sweeps.
//!
//! Scales a base attacker and defender together by `1..=steps` and resolves
//! every resulting battle, showing how attack odds move as both armies grow.
//! Battles are independent, so they are resolved in parallel with rayon.

use attrition_core::battle::Battle;
use attrition_core::chain::SolverConfig;
use attrition_core::unit::Force;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::report::{join_lines, percent};

/// Configuration for a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Attacker at multiplier 1.
    pub attacker: Force,
    /// Defender at multiplier 1.
    pub defender: Force,
    /// Largest multiplier.
    pub steps: u32,
    /// Worker threads (0 = rayon default).
    pub parallel: usize,
    /// Solver settings for every battle.
    pub solver: SolverConfig,
}

impl SweepConfig {
    /// Create a sweep with default threads and solver settings.
    #[must_use]
    pub fn new(attacker: Force, defender: Force, steps: u32) -> Self {
        Self {
            attacker,
            defender,
            steps,
            parallel: 0,
            solver: SolverConfig::default(),
        }
    }

    /// Set the number of worker threads.
    #[must_use]
    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel;
        self
    }
}

/// One resolved battle in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// How many times the base forces were scaled.
    pub multiplier: u32,
    /// Scaled attacking force.
    pub attacker: Force,
    /// Scaled defending force.
    pub defender: Force,
    /// Probability the attacker survives with any units.
    pub attacker_win_probability: f64,
}

/// Resolve every multiplier, returning points in multiplier order.
///
/// # Errors
///
/// Fails if the worker pool cannot start or any battle fails to resolve.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepPoint>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if config.parallel > 0 {
        builder = builder.num_threads(config.parallel);
    }
    let pool = builder.build()?;

    info!(
        steps = config.steps,
        threads = pool.current_num_threads(),
        "Running sweep"
    );

    let points = pool.install(|| {
        (1..=config.steps)
            .into_par_iter()
            .map(|multiplier| resolve_point(config, multiplier))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(points)
}

fn resolve_point(config: &SweepConfig, multiplier: u32) -> Result<SweepPoint> {
    let attacker = config.attacker.scaled(multiplier);
    let defender = config.defender.scaled(multiplier);
    let outcome = Battle::new(attacker, defender)
        .with_config(config.solver)
        .resolve()?;

    debug!(multiplier, %attacker, %defender, "Sweep point resolved");

    Ok(SweepPoint {
        multiplier,
        attacker,
        defender,
        attacker_win_probability: outcome.attacker_win_probability(),
    })
}

/// Plain text table of a sweep.
#[must_use]
pub fn render_sweep(points: &[SweepPoint]) -> String {
    let header = format!(
        "{:>4}  {:<17}  {:<17}  {:>8}",
        "x", "attacker", "defender", "P(win)"
    );
    let rows = points.iter().map(|point| {
        format!(
            "{:>4}  {:<17}  {:<17}  {:>8}",
            point.multiplier,
            point.attacker.to_string(),
            point.defender.to_string(),
            percent(point.attacker_win_probability)
        )
    });
    let lines: Vec<String> = std::iter::once(header).chain(rows).collect();
    join_lines(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrition_core::battle::run_battle;

    fn base() -> SweepConfig {
        SweepConfig::new(
            Force::new([1, 1, 0, 0, 0, 0]),
            Force::new([2, 0, 0, 0, 0, 0]),
            3,
        )
    }

    #[test]
    fn test_points_in_multiplier_order() {
        let points = run_sweep(&base().with_parallel(2)).unwrap();
        let multipliers: Vec<u32> = points.iter().map(|p| p.multiplier).collect();
        assert_eq!(multipliers, vec![1, 2, 3]);
        assert_eq!(points[2].attacker, Force::new([3, 3, 0, 0, 0, 0]));
        assert_eq!(points[2].defender, Force::new([6, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_points_match_single_runs() {
        let points = run_sweep(&base()).unwrap();
        for point in &points {
            let direct = run_battle(&point.attacker, &point.defender).unwrap();
            assert_eq!(
                point.attacker_win_probability.to_bits(),
                direct.attacker_win_probability().to_bits()
            );
        }
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let config = SweepConfig::new(Force::EMPTY, Force::EMPTY, 0);
        assert!(run_sweep(&config).unwrap().is_empty());
    }

    #[test]
    fn test_render_table() {
        let points = run_sweep(&base()).unwrap();
        let table = render_sweep(&points);
        assert_eq!(table.lines().count(), 4);
        assert!(table.lines().nth(1).unwrap().contains("1,1,0,0,0,0"));
    }
}

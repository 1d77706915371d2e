//! Battle scenario files.
//!
//! A scenario is a RON file naming both forces and, optionally, solver
//! settings:
//!
//! ```ron
//! (
//!     name: "Tank rush",
//!     description: "Three tanks against dug-in infantry and artillery",
//!     attacker: (0, 0, 3, 0, 0, 0),
//!     defender: (2, 2, 0, 0, 0, 0),
//! )
//! ```

use std::path::Path;

use attrition_core::battle::Battle;
use attrition_core::chain::SolverConfig;
use attrition_core::outcome::Outcome;
use attrition_core::unit::Force;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CliError, Result};

/// A complete battle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleScenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Attacking force, counts in canonical unit order.
    pub attacker: Force,
    /// Defending force, counts in canonical unit order.
    pub defender: Force,
    /// Solver settings.
    #[serde(default)]
    pub solver: SolverConfig,
}

impl Default for BattleScenario {
    fn default() -> Self {
        Self::tank_rush()
    }
}

impl BattleScenario {
    /// Create a scenario with default solver settings.
    #[must_use]
    pub fn new(name: &str, attacker: Force, defender: Force) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            attacker,
            defender,
            solver: SolverConfig::default(),
        }
    }

    /// Three tanks against two infantry and two artillery.
    #[must_use]
    pub fn tank_rush() -> Self {
        Self {
            description: "Three tanks against dug-in infantry and artillery".to_string(),
            ..Self::new(
                "Tank rush",
                Force::new([0, 0, 3, 0, 0, 0]),
                Force::new([2, 2, 0, 0, 0, 0]),
            )
        }
    }

    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario = Self::from_ron_str(&contents)?;
        info!("Loaded scenario '{}' from {}", scenario.name, path.display());
        Ok(scenario)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        Ok(ron::from_str(ron)?)
    }

    /// Render as pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Save to a RON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// The battle this scenario describes.
    #[must_use]
    pub fn battle(&self) -> Battle {
        Battle::new(self.attacker, self.defender).with_config(self.solver)
    }

    /// Resolve the scenario's battle.
    pub fn resolve(&self) -> Result<Outcome> {
        Ok(self.battle().resolve()?)
    }
}

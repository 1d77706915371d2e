//! Rendering of outcome vectors.
//!
//! Three renderings of the same [`Outcome`]:
//! - a plain text summary with percentages
//! - an ASCII bar chart, most attacker-favourable outcome at the top
//! - JSON for other tools

use attrition_core::outcome::Outcome;
use attrition_core::unit::Force;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable percentages.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Bar chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarConfig {
    /// Width of the longest bar in characters.
    pub width: usize,
    /// Character used for the attacker side.
    pub attacker_fill: char,
    /// Character used for mutual destruction.
    pub neutral_fill: char,
    /// Character used for the defender side.
    pub defender_fill: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 50,
            attacker_fill: '#',
            neutral_fill: '=',
            defender_fill: '*',
        }
    }
}

/// Format a probability as a percentage with two decimals.
///
/// The value is rounded to four decimal places first, so `0.123456`
/// becomes `"12.35%"`.
#[must_use]
pub fn percent(p: f64) -> String {
    let rounded = (p * 10_000.0).round() / 10_000.0;
    format!("{:.2}%", rounded * 100.0)
}

/// Plain text summary: win probability, then every outcome in order.
#[must_use]
pub fn render_text(outcome: &Outcome) -> String {
    let mut lines = vec![
        format!(
            "Probability of successful attack: {}",
            percent(outcome.attacker_win_probability())
        ),
        "Probabilities of outcomes:".to_string(),
    ];
    lines.extend(
        outcome
            .outcomes()
            .map(|(kind, p)| format!("{kind} with probability: {}", percent(p))),
    );
    join_lines(&lines)
}

/// ASCII bar chart, one row per outcome.
///
/// Bars are scaled so the most likely outcome spans `config.width`.
#[must_use]
pub fn render_bars(outcome: &Outcome, config: &BarConfig) -> String {
    let peak = outcome
        .probabilities()
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    let middle = outcome.middle_index();
    let label_width = outcome.len().to_string().len() + 4;

    let mut lines = Vec::with_capacity(outcome.len());
    for (index, &p) in outcome.probabilities().iter().enumerate() {
        let label = if index < middle {
            format!("A{}", middle - index)
        } else if index == middle {
            "--".to_string()
        } else {
            format!("D{}", index - middle)
        };
        let fill = match index.cmp(&middle) {
            std::cmp::Ordering::Less => config.attacker_fill,
            std::cmp::Ordering::Equal => config.neutral_fill,
            std::cmp::Ordering::Greater => config.defender_fill,
        };
        let len = if peak > 0.0 {
            ((p / peak) * config.width as f64).round() as usize
        } else {
            0
        };
        let bar: String = std::iter::repeat(fill).take(len).collect();
        lines.push(format!(
            "{label:>label_width$} |{bar:<width$}| {}",
            percent(p),
            width = config.width
        ));
    }
    join_lines(&lines)
}

/// Join report lines, each terminated by a newline.
pub(crate) fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// JSON shape of a single battle report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    /// Scenario name, if the battle came from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attacking force.
    pub attacker: Force,
    /// Defending force.
    pub defender: Force,
    /// Outcome vector, attacker-favourable first.
    pub probabilities: Vec<f64>,
    /// Index of the "no survivors" outcome.
    pub middle_index: usize,
    /// Probability the attacker survives with any units.
    pub attacker_win_probability: f64,
    /// Probability the defender survives with any units.
    pub defender_win_probability: f64,
    /// Probability both sides are destroyed.
    pub mutual_destruction_probability: f64,
    /// Expected attacking survivors.
    pub expected_attacker_survivors: f64,
    /// Expected defending survivors.
    pub expected_defender_survivors: f64,
}

impl BattleReport {
    /// Collect the report fields from a resolved battle.
    #[must_use]
    pub fn new(name: Option<&str>, attacker: Force, defender: Force, outcome: &Outcome) -> Self {
        Self {
            name: name.map(str::to_string),
            attacker,
            defender,
            probabilities: outcome.probabilities().to_vec(),
            middle_index: outcome.middle_index(),
            attacker_win_probability: outcome.attacker_win_probability(),
            defender_win_probability: outcome.defender_win_probability(),
            mutual_destruction_probability: outcome.mutual_destruction_probability(),
            expected_attacker_survivors: outcome.expected_attacker_survivors(),
            expected_defender_survivors: outcome.expected_defender_survivors(),
        }
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//! Attrition odds calculator.
//!
//! # Usage
//!
//! ```bash
//! # Three tanks against two infantry and two artillery
//! cargo run -p attrition_cli -- run --attacker 0,0,3,0,0,0 --defender 2,2,0,0,0,0 --bars
//!
//! # Resolve a scenario file as JSON
//! cargo run -p attrition_cli -- scenario crates/attrition_cli/scenarios/tank_rush.ron --format json
//!
//! # Scale both sides by 1..=10
//! cargo run -p attrition_cli -- sweep --attacker 1,1,0,0,0,0 --defender 2,0,0,0,0,0 --steps 10
//! ```
//!
//! Unit counts are given in the order
//! Infantry, Artillery, Tank, Fighter, Tactical Bomber, Strategic Bomber.
//!
//! Reports go to stdout; logs go to stderr.

use std::path::{Path, PathBuf};

use attrition_core::outcome::Outcome;
use attrition_core::unit::Force;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use attrition_cli::error::Result;
use attrition_cli::report::{render_bars, render_text, BarConfig, BattleReport, ReportFormat};
use attrition_cli::scenario::BattleScenario;
use attrition_cli::sweep::{render_sweep, run_sweep, SweepConfig};

#[derive(Parser)]
#[command(name = "attrition")]
#[command(about = "Exact outcome odds for dice-based attrition battles")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one battle given on the command line
    Run {
        /// Attacking force, six comma-separated counts
        #[arg(short, long, default_value = "0,0,3,0,0,0")]
        attacker: Force,

        /// Defending force, six comma-separated counts
        #[arg(short, long, default_value = "2,2,0,0,0,0")]
        defender: Force,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Append an ASCII bar chart (text format only)
        #[arg(long)]
        bars: bool,

        /// Width of the longest bar
        #[arg(long, default_value = "50")]
        width: usize,
    },

    /// Resolve a battle described in a RON scenario file
    Scenario {
        /// Scenario file path
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Append an ASCII bar chart (text format only)
        #[arg(long)]
        bars: bool,
    },

    /// Scale both forces by 1..=steps and report attack odds for each
    Sweep {
        /// Attacking force at multiplier 1
        #[arg(short, long, default_value = "1,1,0,0,0,0")]
        attacker: Force,

        /// Defending force at multiplier 1
        #[arg(short, long, default_value = "2,0,0,0,0,0")]
        defender: Force,

        /// Largest multiplier
        #[arg(short, long, default_value = "5")]
        steps: u32,

        /// Maximum parallel battles (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs to stderr; stdout carries reports
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Run {
            attacker,
            defender,
            format,
            bars,
            width,
        } => cmd_run(attacker, defender, format, bars.then_some(width)),
        Commands::Scenario { path, format, bars } => cmd_scenario(&path, format, bars),
        Commands::Sweep {
            attacker,
            defender,
            steps,
            parallel,
            format,
        } => cmd_sweep(attacker, defender, steps, parallel, format),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Resolve a battle from command-line forces
fn cmd_run(
    attacker: Force,
    defender: Force,
    format: ReportFormat,
    bar_width: Option<usize>,
) -> Result<()> {
    let scenario = BattleScenario::new("command line", attacker, defender);
    let outcome = scenario.resolve()?;
    print_report(None, &scenario, &outcome, format, bar_width)
}

/// Resolve a battle from a scenario file
fn cmd_scenario(path: &Path, format: ReportFormat, bars: bool) -> Result<()> {
    let scenario = BattleScenario::load(path)?;
    let outcome = scenario.resolve()?;
    let bar_width = bars.then_some(BarConfig::default().width);
    print_report(Some(&scenario.name), &scenario, &outcome, format, bar_width)
}

/// Run a sweep over scaled forces
fn cmd_sweep(
    attacker: Force,
    defender: Force,
    steps: u32,
    parallel: usize,
    format: ReportFormat,
) -> Result<()> {
    let config = SweepConfig::new(attacker, defender, steps).with_parallel(parallel);
    let points = run_sweep(&config)?;

    match format {
        ReportFormat::Text => print!("{}", render_sweep(&points)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&points)?),
    }
    Ok(())
}

fn print_report(
    name: Option<&str>,
    scenario: &BattleScenario,
    outcome: &Outcome,
    format: ReportFormat,
    bar_width: Option<usize>,
) -> Result<()> {
    match format {
        ReportFormat::Text => {
            if let Some(name) = name {
                println!("{name}");
            }
            print!("{}", render_text(outcome));
            if let Some(width) = bar_width {
                let config = BarConfig {
                    width,
                    ..BarConfig::default()
                };
                println!();
                print!("{}", render_bars(outcome, &config));
            }
        }
        ReportFormat::Json => {
            let report = BattleReport::new(name, scenario.attacker, scenario.defender, outcome);
            println!("{}", report.to_json()?);
        }
    }
    Ok(())
}

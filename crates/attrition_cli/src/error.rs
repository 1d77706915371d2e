//! Error types for the command-line front end.

use attrition_core::error::AttritionError;
use thiserror::Error;

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;

/// Everything that can go wrong outside the engine, plus the engine itself.
#[derive(Error, Debug)]
pub enum CliError {
    /// Scenario file not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),

    /// Failed to read or write a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a RON scenario.
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Failed to write RON.
    #[error("Failed to serialise scenario: {0}")]
    Serialise(#[from] ron::Error),

    /// Failed to render JSON.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Could not build the sweep thread pool.
    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The resolution engine rejected the input or failed.
    #[error(transparent)]
    Engine(#[from] AttritionError),
}

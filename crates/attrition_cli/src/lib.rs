//! # Attrition CLI
//!
//! Command-line front end for the resolution engine:
//! - Battle scenarios loaded from RON files
//! - Text, ASCII bar chart and JSON reports
//! - Parallel sweeps over scaled forces
//!
//! The engine knows nothing about any of this; the CLI only reads the
//! outcome vector and its middle index.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod report;
pub mod scenario;
pub mod sweep;

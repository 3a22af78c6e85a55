//! Self-play harness for ML-chess opponents
//!
//! This crate provides infrastructure for:
//! - Playing configured opponent tiers against each other
//! - Recording every game as coordinate moves
//! - Saving results as JSON and printing a text report
//!
//! # Usage
//!
//! ```bash
//! # Master against Advanced, ten games
//! cargo run -p selfplay -- --white master --black advanced --games 10
//!
//! # Everything from a TOML file, results to JSON
//! cargo run -p selfplay -- --config match.toml --out results.json
//! ```

mod match_runner;
mod results;

pub use match_runner::*;
pub use results::*;

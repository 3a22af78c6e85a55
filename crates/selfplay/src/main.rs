//! Self-play CLI
//!
//! Pit two opponent tiers against each other and report the score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use opponent::Strength;
use selfplay::{MatchConfig, MatchRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Play computer opponents against each other", long_about = None)]
struct Args {
    /// Match config in TOML; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strength of the first player (name or tier 1-6)
    #[arg(short, long)]
    white: Option<Strength>,

    /// Strength of the second player (name or tier 1-6)
    #[arg(short, long)]
    black: Option<Strength>,

    /// Number of games
    #[arg(short, long)]
    games: Option<u32>,

    /// Plies per game before it is scored as unfinished
    #[arg(long)]
    max_plies: Option<u32>,

    /// Seed both players for a reproducible match
    #[arg(long)]
    seed: Option<u64>,

    /// Write results as JSON
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("loading match config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(strength) = args.white {
        config.white.strength = strength;
    }
    if let Some(strength) = args.black {
        config.black.strength = strength;
    }
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(max_plies) = args.max_plies {
        config.max_plies = max_plies;
    }
    if let Some(seed) = args.seed {
        config.white.seed = Some(seed);
        config.black.seed = Some(seed.wrapping_add(1));
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let results = MatchRunner::new(config)
        .run()
        .context("starting search workers")?;
    println!("{}", results.generate_report());

    if let Some(path) = &args.out {
        results
            .save(path)
            .with_context(|| format!("saving results to {}", path.display()))?;
        info!(path = %path.display(), "results saved");
    }
    Ok(())
}

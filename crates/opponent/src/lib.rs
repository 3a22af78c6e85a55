//! Computer opponent with tiered playing strength
//!
//! This crate provides:
//! - Six strength tiers, from random moves up to a timed alpha-beta search
//! - [`select_move`] for picking a move on the calling thread
//! - [`SearchWorker`], a background thread with a bounded wait and a
//!   greedy fallback when the thread misbehaves
//! - [`OpponentConfig`] loaded from TOML
//!
//! # Usage
//!
//! ```no_run
//! use chess_core::Game;
//! use opponent::{Opponent, OpponentConfig, Strength};
//!
//! let mut cpu = Opponent::new(OpponentConfig::new(Strength::Master)).unwrap();
//! let game = Game::new();
//! let reply = cpu.choose_move(&game);
//! ```

mod config;
mod select;
mod strength;
mod worker;

pub use config::*;
pub use select::*;
pub use strength::*;
pub use worker::*;

use chess_core::{Game, Move};

/// A configured opponent bound to its own search worker.
#[derive(Debug)]
pub struct Opponent {
    config: OpponentConfig,
    worker: SearchWorker,
}

impl Opponent {
    pub fn new(config: OpponentConfig) -> Result<Self, WorkerError> {
        let worker = SearchWorker::from_config(&config)?;
        Ok(Self { config, worker })
    }

    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }

    /// Move for the side to move; None only when the game is over.
    pub fn choose_move(&mut self, game: &Game) -> Option<Move> {
        self.worker.select_move_or_fallback(
            game,
            self.config.strength,
            self.config.effective_budget_ms(),
            self.config.effective_time_control(),
        )
    }
}

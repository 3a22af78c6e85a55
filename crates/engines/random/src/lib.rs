//! Random Move Chess Engines
//!
//! The three weakest opponent tiers:
//! - [`RandomEngine`]: a uniform pick from all legal moves
//! - [`GreedyEngine`]: grabs the most valuable capture, otherwise a random quiet move
//! - [`TacticalEngine`]: one-ply heuristics (captures, centre, development) plus noise
//!
//! Each engine owns its RNG so games can be replayed from a seed.

mod greedy;
mod tactical;

use chess_core::{Engine, Game, Move, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub use greedy::{greedy_move, GreedyEngine, GREEDY_MARGIN, GREEDY_POOL};
pub use tactical::{tactical_move, tactical_score, TacticalEngine, DEFAULT_RANDOMNESS, TOP_FRACTION_PERCENT};

#[cfg(test)]
mod lib_tests;

/// Uniform choice among the legal moves; None when the game is over.
pub fn random_move<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Option<Move> {
    game.all_legal_moves().choose(rng).copied()
}

/// Wraps a move picker's answer in a [`SearchResult`].
pub(crate) fn one_ply_result(best_move: Option<Move>) -> SearchResult {
    SearchResult {
        best_move,
        score: 0,
        depth: u8::from(best_move.is_some()),
        nodes: u64::from(best_move.is_some()),
        stopped: false,
    }
}

/// A chess engine that plays random legal moves.
///
/// This engine provides no evaluation - it simply picks a random move
/// from all available legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine<R = StdRng> {
    rng: R,
}

impl RandomEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for RandomEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Engine for RandomEngine<R> {
    fn search(&mut self, game: &Game, _limits: SearchLimits) -> SearchResult {
        one_ply_result(random_move(game, &mut self.rng))
    }

    fn name(&self) -> &str {
        "Random"
    }
}

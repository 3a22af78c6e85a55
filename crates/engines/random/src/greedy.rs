//! Tier 2: take the biggest capture on offer.

use std::cmp::Reverse;

use chess_core::{Engine, Game, Move, SearchLimits, SearchResult};
use classical_engine::piece_value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::one_ply_result;

/// Moves scoring within this much of the best one stay in the pool.
pub const GREEDY_MARGIN: i32 = 50;
/// Largest pool the final pick is drawn from.
pub const GREEDY_POOL: usize = 3;

/// Scores captures by the victim's value and quiet moves by a random
/// `0..GREEDY_MARGIN`, then picks among the near-best few.
pub fn greedy_move<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Option<Move> {
    let mut scored: Vec<(Move, i32)> = game
        .all_legal_moves()
        .into_iter()
        .map(|mv| {
            let score = match mv.captured {
                Some(victim) => piece_value(victim.kind),
                None => rng.gen_range(0..GREEDY_MARGIN),
            };
            (mv, score)
        })
        .collect();
    scored.sort_by_key(|&(_, score)| Reverse(score));

    let best = scored.first()?.1;
    let pool = scored
        .iter()
        .take(GREEDY_POOL)
        .take_while(|&&(_, score)| best - score <= GREEDY_MARGIN)
        .count();
    Some(scored[rng.gen_range(0..pool)].0)
}

/// Engine wrapper around [`greedy_move`].
#[derive(Debug, Clone)]
pub struct GreedyEngine<R = StdRng> {
    rng: R,
}

impl GreedyEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for GreedyEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GreedyEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Engine for GreedyEngine<R> {
    fn search(&mut self, game: &Game, _limits: SearchLimits) -> SearchResult {
        one_ply_result(greedy_move(game, &mut self.rng))
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

#[cfg(test)]
#[path = "greedy_tests.rs"]
mod greedy_tests;

//! Tier 3: one-ply heuristics with a little noise.

use chess_core::{Engine, Game, Move, PieceKind, SearchLimits, SearchResult, Square};
use classical_engine::piece_value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::one_ply_result;

pub const DEFAULT_RANDOMNESS: f64 = 0.3;
/// Share of the ranked moves the final pick is drawn from.
pub const TOP_FRACTION_PERCENT: usize = 20;

const CENTER_BONUS: f64 = 2.0;
const DEVELOPMENT_BONUS: f64 = 1.0;

fn in_center(sq: Square) -> bool {
    (2..=5).contains(&sq.file()) && (2..=5).contains(&sq.rank())
}

/// Heuristic score of `mv` before noise.
pub fn tactical_score(mv: &Move) -> f64 {
    let mut score = 0.0;
    if let Some(victim) = mv.captured {
        score += f64::from(piece_value(victim.kind) / 10);
    }
    if in_center(mv.to) {
        score += CENTER_BONUS;
    }
    if mv.piece.kind != PieceKind::Pawn && mv.from.rank() == mv.piece.color.home_rank() {
        score += DEVELOPMENT_BONUS;
    }
    score
}

/// Ranks every legal move by [`tactical_score`] plus up to `randomness`
/// of noise and picks uniformly from the top fifth.
pub fn tactical_move<R: Rng + ?Sized>(game: &Game, rng: &mut R, randomness: f64) -> Option<Move> {
    let mut scored: Vec<(Move, f64)> = game
        .all_legal_moves()
        .into_iter()
        .map(|mv| (mv, tactical_score(&mv) + rng.gen::<f64>() * randomness))
        .collect();
    if scored.is_empty() {
        return None;
    }
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let pool = (scored.len() * TOP_FRACTION_PERCENT / 100).max(1);
    Some(scored[rng.gen_range(0..pool)].0)
}

/// Engine wrapper around [`tactical_move`].
#[derive(Debug, Clone)]
pub struct TacticalEngine<R = StdRng> {
    rng: R,
    randomness: f64,
}

impl TacticalEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for TacticalEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TacticalEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            randomness: DEFAULT_RANDOMNESS,
        }
    }

    pub fn randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness;
        self
    }
}

impl<R: Rng + Send> Engine for TacticalEngine<R> {
    fn search(&mut self, game: &Game, _limits: SearchLimits) -> SearchResult {
        one_ply_result(tactical_move(game, &mut self.rng, self.randomness))
    }

    fn name(&self) -> &str {
        "Tactical"
    }
}

#[cfg(test)]
#[path = "tactical_tests.rs"]
mod tactical_tests;

//! Move selection for a given strength tier.

use chess_core::{move_to_coord, Engine, Game, Move, SearchLimits};
use classical_engine::ClassicalEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use random_engine::{greedy_move, random_move, tactical_move, DEFAULT_RANDOMNESS};
use tracing::debug;

use crate::strength::{Strategy, Strength, TimeControlKind};

/// Picks a move for the side to move at `strength`, using a fresh
/// entropy-seeded RNG and the tier's default clock.
///
/// Returns None exactly when the game is over.
pub fn select_move(game: &Game, strength: Strength, time_budget_ms: u64) -> Option<Move> {
    let time_control = TimeControlKind::default_for(strength, false);
    let mut rng = StdRng::from_entropy();
    select_move_with_rng(game, strength, time_budget_ms, time_control, &mut rng)
}

/// Like [`select_move`] with the clock and the RNG supplied by the caller.
///
/// Searching tiers spend at most the smaller of `time_budget_ms` and the
/// tier's thinking time.
pub fn select_move_with_rng<R: Rng + ?Sized>(
    game: &Game,
    strength: Strength,
    time_budget_ms: u64,
    time_control: TimeControlKind,
    rng: &mut R,
) -> Option<Move> {
    if game.is_game_over() {
        return None;
    }

    let best_move = match strength.strategy() {
        Strategy::Random => random_move(game, rng),
        Strategy::Greedy => greedy_move(game, rng),
        Strategy::Tactical => tactical_move(game, rng, DEFAULT_RANDOMNESS),
        Strategy::Search => match strength.search_profile(time_control) {
            Some(profile) => {
                let budget_ms = time_budget_ms.min(profile.think_time_ms);
                let limits = SearchLimits::budget(profile.max_depth, budget_ms);
                let move_time_ms = limits.move_time.map_or(0, |t| t.as_millis() as u64);
                let mut engine = ClassicalEngine::with_config(profile.search_config());
                let result = engine.search(game, limits);
                debug!(
                    move_time_ms,
                    depth = result.depth,
                    score = result.score,
                    nodes = result.nodes,
                    stopped = result.stopped,
                    "search finished"
                );
                result.best_move
            }
            None => greedy_move(game, rng),
        },
    };

    if let Some(mv) = &best_move {
        debug!(
            %strength,
            side = %game.side_to_move(),
            mv = %move_to_coord(mv),
            "selected move"
        );
    }
    best_move
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod select_tests;

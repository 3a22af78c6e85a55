//! Classical Chess Engine
//!
//! Iterative-deepening alpha-beta search over a hand-tuned evaluation.
//! This is the engine behind the strongest opponent tiers.

mod eval;
mod search;

use chess_core::{Engine, Game, SearchLimits, SearchResult};

pub use eval::{evaluate, is_endgame, piece_square, piece_value, KING_VALUE};
pub use search::{
    order_moves, order_score, search, BranchLimits, SearchConfig, SearchOutcome, MATE_SCORE,
    MATE_THRESHOLD,
};

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// This engine uses:
/// - Iterative deepening with the previous best move searched first
/// - Capture-first move ordering and per-depth branch truncation
/// - Quiescence search over captures at the horizon
/// - Material, piece-square, mobility and pawn-structure evaluation
#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine {
    config: SearchConfig,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with tier-specific branch limits. The depth in the
    /// [`SearchLimits`] passed to `search` still takes precedence.
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config, nodes: 0 }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, game: &Game, mut limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        if game.is_game_over() {
            return SearchResult::none();
        }
        limits.start();

        let config = SearchConfig {
            max_depth: limits.max_depth,
            ..self.config
        };
        let outcome = search::search(game, &config, &limits.time_control);
        self.nodes = outcome.nodes;

        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: outcome.completed_depth,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Classical"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

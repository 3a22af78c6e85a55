pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use error::ChessError;
pub use game::*;
pub use movegen::*;
pub use notation::*;
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait: implemented by every move-selection strategy
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move (None only when the game is over)
    pub best_move: Option<Move>,
    /// Evaluation score in centipawns from the side to move
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the clock cut the search short
    pub stopped: bool,
}

impl SearchResult {
    /// Result for a finished game.
    pub fn none() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all move-selection strategies implement.
///
/// Randomized tiers, the heuristic tiers and the alpha-beta searcher all sit
/// behind this seam so the opponent layer can swap them by strength.
pub trait Engine: Send {
    /// Choose a move for the side to move.
    ///
    /// Must return `Some` whenever the game has a legal move and `None`
    /// when the game is over. The caller's game is never modified.
    fn search(&mut self, game: &Game, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for logs and reports
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}

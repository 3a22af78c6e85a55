//! Errors raised at the game boundary.

use thiserror::Error;

use crate::game::GameStatus;
use crate::types::{Color, PieceKind, Square};

/// Rejections from the rules engine. A rejected request never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("cannot promote to {requested:?}")]
    InvalidPromotion { requested: PieceKind },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {square} does not belong to {to_move}")]
    WrongSide { square: Square, to_move: Color },

    #[error("game is over: {0}")]
    GameOver(GameStatus),

    #[error("invalid square {0:?}")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

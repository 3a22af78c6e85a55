//! The game state machine.
//!
//! A [`Game`] is a value: applying a move derives a new game and leaves the
//! original untouched, so search can explore freely on clones while the
//! caller keeps the authoritative copy.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::{Position, initial_position};
use crate::error::ChessError;
use crate::movegen::{has_legal_move, legal_destinations, legal_moves_into};
use crate::types::*;

/// Half-moves without a capture or pawn move that end the game.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Occurrences of the same placement that end the game.
pub const REPETITION_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Active
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn draw_reason(self) -> Option<DrawReason> {
        match self {
            GameStatus::Draw(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => f.write_str("Game in progress"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate! {winner} wins!"),
            GameStatus::Stalemate => f.write_str("Stalemate!"),
            GameStatus::Draw(DrawReason::FiftyMoveRule) => f.write_str("Draw by 50-move rule"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                f.write_str("Draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                f.write_str("Draw by threefold repetition")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    position: Position,
    side_to_move: Color,
    history: Vec<Move>,
    halfmove_clock: u32,
    fullmove_number: u32,
    en_passant: Option<Square>,
    status: GameStatus,
    /// Placement signature of every position reached, the start included.
    signatures: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A fresh game in the standard starting position.
    pub fn new() -> Self {
        let position = initial_position();
        let signatures = vec![position.signature()];
        Game {
            position,
            side_to_move: Color::White,
            history: Vec::new(),
            halfmove_clock: 0,
            fullmove_number: 1,
            en_passant: None,
            status: GameStatus::Active,
            signatures,
        }
    }

    /// Builds a game from a FEN record and settles its status immediately,
    /// so a constructed dead or mated position reports as finished.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(ChessError::InvalidFen(format!(
                "expected at least 4 fields, found {}",
                parts.len()
            )));
        }

        let position = Position::from_fen_fields(parts[0], parts[2])?;
        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::InvalidFen(format!("bad side to move {other:?}"))),
        };
        let en_passant = match parts[3] {
            "-" => None,
            s => Some(s.parse::<Square>()?),
        };
        let halfmove_clock = parse_counter(parts.get(4).copied(), 0)?;
        let fullmove_number = parse_counter(parts.get(5).copied(), 1)?;

        let signatures = vec![position.signature()];
        let mut game = Game {
            position,
            side_to_move,
            history: Vec::new(),
            halfmove_clock,
            fullmove_number,
            en_passant,
            status: GameStatus::Active,
            signatures,
        };
        game.status = game.detect_termination();
        Ok(game)
    }

    pub fn to_fen(&self) -> String {
        let ep = self
            .en_passant
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        format!(
            "{} {} {} {} {} {}",
            self.position.placement_fen(),
            side,
            self.position.castling_fen(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn history(&self) -> &[Move] {
        &self.history
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn game_result(&self) -> GameStatus {
        self.status
    }
    pub fn winner(&self) -> Option<Color> {
        self.status.winner()
    }
    pub fn draw_reason(&self) -> Option<DrawReason> {
        self.status.draw_reason()
    }
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }
    pub fn is_in_check(&self) -> bool {
        self.position.in_check(self.side_to_move)
    }

    /// Legal destinations from `square`. Empty for an empty square, the
    /// opponent's piece, or a finished game.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        if self.is_game_over() {
            return Vec::new();
        }
        match self.position.piece_at(square) {
            Some(pc) if pc.color == self.side_to_move => {
                legal_destinations(&self.position, square, self.en_passant)
            }
            _ => Vec::new(),
        }
    }

    /// Every legal move for the side to move, with promotions expanded.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.legal_moves_into(&mut out);
        out
    }

    pub fn legal_moves_into(&self, out: &mut Vec<Move>) {
        if self.is_game_over() {
            out.clear();
            return;
        }
        legal_moves_into(&self.position, self.side_to_move, self.en_passant, out);
    }

    /// True if moving `from` to `to` would put a pawn on its last rank.
    pub fn requires_promotion(&self, from: Square, to: Square) -> bool {
        self.position.piece_at(from).is_some_and(|pc| {
            pc.kind == PieceKind::Pawn && to.rank() == pc.color.promotion_rank()
        })
    }

    /// Validates and applies a move, returning the resulting game.
    ///
    /// `promotion` defaults to a queen when omitted on a promoting move. A
    /// king or pawn promotion, or a promotion piece on a move that does not
    /// promote, is rejected.
    pub fn apply_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Game, ChessError> {
        if self.is_game_over() {
            return Err(ChessError::GameOver(self.status));
        }
        let piece = self
            .position
            .piece_at(from)
            .ok_or(ChessError::EmptySquare(from))?;
        if piece.color != self.side_to_move {
            return Err(ChessError::WrongSide {
                square: from,
                to_move: self.side_to_move,
            });
        }
        if let Some(requested) = promotion
            && (matches!(requested, PieceKind::King | PieceKind::Pawn)
                || !self.requires_promotion(from, to))
        {
            return Err(ChessError::InvalidPromotion { requested });
        }
        if !legal_destinations(&self.position, from, self.en_passant).contains(&to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let (position, mv) = self
            .position
            .play(from, to, promotion, self.en_passant)
            .ok_or(ChessError::EmptySquare(from))?;
        Ok(self.advance(position, mv))
    }

    /// Applies a move taken from [`Game::all_legal_moves`] without
    /// re-validating it.
    pub fn apply_legal(&self, mv: &Move) -> Game {
        match self
            .position
            .play(mv.from, mv.to, mv.promotion, self.en_passant)
        {
            Some((position, record)) => self.advance(position, record),
            None => self.clone(),
        }
    }

    fn advance(&self, position: Position, mv: Move) -> Game {
        let mover = self.side_to_move;

        let en_passant = if mv.piece.kind == PieceKind::Pawn
            && (mv.to.rank() - mv.from.rank()).abs() == 2
        {
            mv.from.offset(0, mover.forward())
        } else {
            None
        };

        let halfmove_clock = if mv.is_irreversible() {
            0
        } else {
            self.halfmove_clock + 1
        };
        let fullmove_number = match mover {
            Color::Black => self.fullmove_number + 1,
            Color::White => self.fullmove_number,
        };

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(mv);

        let mut signatures = Vec::with_capacity(self.signatures.len() + 1);
        signatures.extend_from_slice(&self.signatures);
        signatures.push(position.signature());

        let mut next = Game {
            position,
            side_to_move: mover.other(),
            history,
            halfmove_clock,
            fullmove_number,
            en_passant,
            status: GameStatus::Active,
            signatures,
        };
        next.status = next.detect_termination();
        if next.status.is_terminal() {
            trace!(status = %next.status, plies = next.history.len(), "game finished");
        }
        next
    }

    /// Draws first (fifty-move, material, repetition), then mate or stalemate.
    fn detect_termination(&self) -> GameStatus {
        if self.halfmove_clock >= FIFTY_MOVE_PLIES {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.position.has_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        if self.repetitions() >= REPETITION_LIMIT {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        if has_legal_move(&self.position, self.side_to_move, self.en_passant) {
            return GameStatus::Active;
        }
        if self.is_in_check() {
            GameStatus::Checkmate {
                winner: self.side_to_move.other(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Occurrences of the current placement.
    ///
    /// Positions before the last capture or pawn move can never recur, so
    /// only the window since then is scanned.
    pub fn repetitions(&self) -> usize {
        let Some(&current) = self.signatures.last() else {
            return 0;
        };
        let window = (self.halfmove_clock as usize + 1).min(self.signatures.len());
        self.signatures[self.signatures.len() - window..]
            .iter()
            .filter(|&&s| s == current)
            .count()
    }
}

fn parse_counter(field: Option<&str>, default: u32) -> Result<u32, ChessError> {
    match field {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| ChessError::InvalidFen(format!("bad counter {s:?}"))),
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;

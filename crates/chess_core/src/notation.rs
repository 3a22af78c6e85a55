//! Coordinate move notation (`e2e4`, `e7e8q`).

use crate::error::ChessError;
use crate::game::Game;
use crate::types::*;

pub fn move_to_coord(mv: &Move) -> String {
    let mut s = format!("{}{}", mv.from, mv.to);
    if let Some(p) = mv.promotion {
        s.push(p.to_char());
    }
    s
}

/// Splits coordinate notation into origin, destination and optional promotion kind.
pub fn parse_coord(txt: &str) -> Result<(Square, Square, Option<PieceKind>), ChessError> {
    let txt = txt.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(ChessError::InvalidSquare(txt.to_string()));
    }
    let from: Square = txt[0..2].parse()?;
    let to: Square = txt[2..4].parse()?;
    let promotion = match txt[4..].chars().next() {
        None => None,
        Some(c) => Some(
            PieceKind::from_char(c).ok_or_else(|| ChessError::InvalidSquare(txt.to_string()))?,
        ),
    };
    Ok((from, to, promotion))
}

/// Applies a sequence of coordinate moves through [`Game::apply_move`].
pub fn play_coords<'a, I>(game: &Game, moves: I) -> Result<Game, ChessError>
where
    I: IntoIterator<Item = &'a str>,
{
    moves.into_iter().try_fold(game.clone(), |g, txt| {
        let (from, to, promotion) = parse_coord(txt)?;
        g.apply_move(from, to, promotion)
    })
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;

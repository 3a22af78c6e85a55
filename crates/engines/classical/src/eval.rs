//! Static evaluation: material, piece-square tables, mobility, pawn
//! structure, king safety and the bishop pair.

use chess_core::{Color, Game, PieceKind, Position, Square, count_legal_moves};

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, KING_VALUE];

/// Weight used wherever a king has to be ranked against other pieces.
pub const KING_VALUE: i32 = 20_000;

/// Below this much non-king material on the board the king tables switch
/// to the endgame layout and king safety stops counting.
pub const ENDGAME_MATERIAL: i32 = 2500;

pub const MOBILITY_WEIGHT: i32 = 5;
pub const DOUBLED_PAWN_PENALTY: i32 = 30;
pub const KING_LEFT_HOME_PENALTY: i32 = 60;
pub const KING_CORNER_BONUS: i32 = 40;
pub const BISHOP_PAIR_BONUS: i32 = 50;

// Piece-square tables from White's side, rank 8 first.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLE_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_END_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

/// Centipawn value of a piece kind.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Total non-king material of both sides.
pub fn non_king_material(pos: &Position) -> i32 {
    pos.pieces()
        .filter(|(_, pc)| pc.kind != PieceKind::King)
        .map(|(_, pc)| piece_value(pc.kind))
        .sum()
}

pub fn is_endgame(pos: &Position) -> bool {
    non_king_material(pos) < ENDGAME_MATERIAL
}

/// Piece-square bonus for a piece of `color` and `kind` on `sq`.
pub fn piece_square(color: Color, kind: PieceKind, sq: Square, endgame: bool) -> i32 {
    let file = sq.file() as usize;
    let rank = sq.rank() as usize;
    let idx = match color {
        Color::White => (7 - rank) * 8 + file,
        Color::Black => rank * 8 + file,
    };
    let table = match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King if endgame => &KING_END_TABLE,
        PieceKind::King => &KING_MIDDLE_TABLE,
    };
    table[idx]
}

fn king_safety(color: Color, sq: Square) -> i32 {
    if sq.rank() != color.home_rank() {
        -KING_LEFT_HOME_PENALTY
    } else if sq.file() <= 2 || sq.file() >= 6 {
        KING_CORNER_BONUS
    } else {
        0
    }
}

/// Evaluates the game from `for_color`'s perspective.
///
/// Returns a score in centipawns:
/// - Positive = good for `for_color`
/// - Negative = bad for `for_color`
///
/// Every term is computed for both sides and the opponent's total is
/// subtracted, so `evaluate(g, White) == -evaluate(g, Black)`.
pub fn evaluate(game: &Game, for_color: Color) -> i32 {
    let pos = game.position();
    let endgame = is_endgame(pos);

    let mut score = [0i32; 2];
    let mut pawns_on_file = [[0u8; 8]; 2];
    let mut bishops = [0u8; 2];

    for (sq, pc) in pos.pieces() {
        let side = pc.color.idx();
        if pc.kind != PieceKind::King {
            score[side] += piece_value(pc.kind);
        }
        score[side] += piece_square(pc.color, pc.kind, sq, endgame);
        match pc.kind {
            PieceKind::Pawn => pawns_on_file[side][sq.file() as usize] += 1,
            PieceKind::Bishop => bishops[side] += 1,
            PieceKind::King if !endgame => score[side] += king_safety(pc.color, sq),
            _ => {}
        }
    }

    for color in [Color::White, Color::Black] {
        let side = color.idx();
        let doubled = pawns_on_file[side].iter().filter(|&&n| n > 1).count() as i32;
        score[side] -= DOUBLED_PAWN_PENALTY * doubled;
        if bishops[side] >= 2 {
            score[side] += BISHOP_PAIR_BONUS;
        }

        // Only the side to move may capture en passant.
        let ep = if color == game.side_to_move() {
            game.en_passant()
        } else {
            None
        };
        score[side] += MOBILITY_WEIGHT * count_legal_moves(pos, color, ep) as i32;
    }

    score[for_color.idx()] - score[for_color.other().idx()]
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;

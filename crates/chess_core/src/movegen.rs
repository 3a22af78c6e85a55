use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

/// Geometry-only destinations for the piece on `from`.
///
/// Castling destinations are included only when the king and rook are
/// unmoved, the squares between them are empty, and the king is not in
/// check and does not pass through or land on an attacked square.
pub fn pseudo_moves(pos: &Position, from: Square, en_passant: Option<Square>) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    pseudo_moves_into(pos, from, en_passant, &mut out);
    out
}

fn pseudo_moves_into(
    pos: &Position,
    from: Square,
    en_passant: Option<Square>,
    out: &mut Vec<Square>,
) {
    let pc = match pos.piece_at(from) {
        Some(p) => p,
        None => return,
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc, en_passant, out),
        PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => gen_slider(pos, from, pc.color, &DIAGONALS, out),
        PieceKind::Rook => gen_slider(pos, from, pc.color, &ORTHOGONALS, out),
        PieceKind::Queen => {
            gen_slider(pos, from, pc.color, &DIAGONALS, out);
            gen_slider(pos, from, pc.color, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc.color, &KING_DELTAS, out);
            gen_castle(pos, from, pc, out);
        }
    }
}

/// Destinations from `from` that do not leave the mover's king attacked.
pub fn legal_destinations(
    pos: &Position,
    from: Square,
    en_passant: Option<Square>,
) -> Vec<Square> {
    let mover = match pos.piece_at(from) {
        Some(pc) => pc.color,
        None => return Vec::new(),
    };
    let mut out = pseudo_moves(pos, from, en_passant);
    out.retain(|&to| leaves_king_safe(pos, from, to, None, en_passant, mover).is_some());
    out
}

/// Generate every legal move for `side` into the provided buffer.
///
/// A pawn reaching the last rank yields one record per promotion kind,
/// queen first.
pub fn legal_moves_into(
    pos: &Position,
    side: Color,
    en_passant: Option<Square>,
    out: &mut Vec<Move>,
) {
    out.clear();
    let mut targets = Vec::with_capacity(28);
    for (from, pc) in pos.pieces() {
        if pc.color != side {
            continue;
        }
        targets.clear();
        pseudo_moves_into(pos, from, en_passant, &mut targets);
        for &to in &targets {
            if pc.kind == PieceKind::Pawn && to.rank() == side.promotion_rank() {
                for kind in PieceKind::PROMOTIONS {
                    if let Some(mv) = leaves_king_safe(pos, from, to, Some(kind), en_passant, side)
                    {
                        out.push(mv);
                    }
                }
            } else if let Some(mv) = leaves_king_safe(pos, from, to, None, en_passant, side) {
                out.push(mv);
            }
        }
    }
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position, side: Color, en_passant: Option<Square>) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, side, en_passant, &mut out);
    out
}

/// True as soon as one legal move for `side` is found.
pub fn has_legal_move(pos: &Position, side: Color, en_passant: Option<Square>) -> bool {
    let mut targets = Vec::with_capacity(28);
    pos.pieces().filter(|(_, pc)| pc.color == side).any(|(from, _)| {
        targets.clear();
        pseudo_moves_into(pos, from, en_passant, &mut targets);
        targets
            .iter()
            .any(|&to| leaves_king_safe(pos, from, to, None, en_passant, side).is_some())
    })
}

/// Number of legal from/to pairs for `side`; promotion choices count once.
pub fn count_legal_moves(pos: &Position, side: Color, en_passant: Option<Square>) -> usize {
    let mut targets = Vec::with_capacity(28);
    let mut count = 0;
    for (from, pc) in pos.pieces() {
        if pc.color != side {
            continue;
        }
        targets.clear();
        pseudo_moves_into(pos, from, en_passant, &mut targets);
        count += targets
            .iter()
            .filter(|&&to| leaves_king_safe(pos, from, to, None, en_passant, side).is_some())
            .count();
    }
    count
}

pub fn is_square_attacked(pos: &Position, square: Square, by: Color) -> bool {
    pos.is_square_attacked(square, by)
}

/// Plays the candidate on a copy and keeps it only if `mover` is not in check afterwards.
fn leaves_king_safe(
    pos: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    en_passant: Option<Square>,
    mover: Color,
) -> Option<Move> {
    let (next, mv) = pos.play(from, to, promotion, en_passant)?;
    (!next.in_check(mover)).then_some(mv)
}

fn gen_pawn(
    pos: &Position,
    from: Square,
    pc: Piece,
    en_passant: Option<Square>,
    out: &mut Vec<Square>,
) {
    let dir = pc.color.forward();

    // forward 1, then forward 2 from the start rank
    if let Some(to) = from.offset(0, dir)
        && pos.piece_at(to).is_none()
    {
        out.push(to);
        if !pc.has_moved
            && from.rank() == pc.color.pawn_start_rank()
            && let Some(to2) = from.offset(0, 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(to2);
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            match pos.piece_at(to) {
                Some(target) if target.color != pc.color => out.push(to),
                None if en_passant == Some(to) => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(to),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to.offset(df, dr);
        }
    }
}

fn gen_castle(pos: &Position, from: Square, king: Piece, out: &mut Vec<Square>) {
    let c = king.color;
    let rank = c.home_rank();
    if king.has_moved || Square::new(4, rank) != Some(from) {
        return;
    }
    let enemy = c.other();
    if pos.is_square_attacked(from, enemy) {
        return;
    }

    let empty = |file: i8| Square::new(file, rank).is_some_and(|s| pos.piece_at(s).is_none());
    let safe = |file: i8| Square::new(file, rank).is_some_and(|s| !pos.is_square_attacked(s, enemy));

    // King side: f and g empty and unattacked.
    if pos.castling_pieces_unmoved(c, 7)
        && empty(5)
        && empty(6)
        && safe(5)
        && safe(6)
        && let Some(to) = Square::new(6, rank)
    {
        out.push(to);
    }

    // Queen side: b, c and d empty; the king crosses d and lands on c.
    if pos.castling_pieces_unmoved(c, 0)
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(3)
        && safe(2)
        && let Some(to) = Square::new(2, rank)
    {
        out.push(to);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;

use crate::error::ChessError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement: every square maps to an optional piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
}

/// The standard 32-piece starting layout.
pub fn initial_position() -> Position {
    let mut p = Position::empty();
    for (f, &kind) in BACK_RANK.iter().enumerate() {
        let file = f as i8;
        for color in [Color::White, Color::Black] {
            if let Some(s) = Square::new(file, color.home_rank()) {
                p.set_piece(s, Some(Piece::new(color, kind)));
            }
            if let Some(s) = Square::new(file, color.pawn_start_rank()) {
                p.set_piece(s, Some(Piece::new(color, PieceKind::Pawn)));
            }
        }
    }
    p
}

impl Default for Position {
    fn default() -> Self {
        initial_position()
    }
}

impl Position {
    pub fn empty() -> Self {
        Position { board: [None; 64] }
    }

    /// Parses the placement and castling fields of a FEN record.
    ///
    /// Kings and rooks count as unmoved only on their home squares with a
    /// matching castling right; pawns count as unmoved only on their start rank.
    pub fn from_fen_fields(placement: &str, castling: &str) -> Result<Self, ChessError> {
        let mut p = Position::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if !(1..=8).contains(&d) || file + d as i8 > 8 {
                        return Err(ChessError::InvalidFen(format!(
                            "rank {} overflows",
                            rank + 1
                        )));
                    }
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch)
                        .ok_or_else(|| ChessError::InvalidFen(format!("bad piece {ch:?}")))?;
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = Square::new(file, rank).ok_or_else(|| {
                        ChessError::InvalidFen(format!("rank {} overflows", rank + 1))
                    })?;
                    let mut piece = Piece::new(color, kind);
                    piece.has_moved = match kind {
                        PieceKind::Pawn => rank != color.pawn_start_rank(),
                        PieceKind::King | PieceKind::Rook => true,
                        _ => false,
                    };
                    p.set_piece(s, Some(piece));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(ChessError::InvalidFen(format!(
                    "rank {} has {file} files",
                    rank + 1
                )));
            }
        }

        if castling != "-" {
            for c in castling.chars() {
                let (color, rook_file) = match c {
                    'K' => (Color::White, 7),
                    'Q' => (Color::White, 0),
                    'k' => (Color::Black, 7),
                    'q' => (Color::Black, 0),
                    _ => return Err(ChessError::InvalidFen(format!("bad castling flag {c:?}"))),
                };
                let rank = color.home_rank();
                let king_sq = Square::new(4, rank);
                let rook_sq = Square::new(rook_file, rank);
                if let (Some(ks), Some(rs)) = (king_sq, rook_sq)
                    && let Some(king) = p.piece_at(ks)
                    && king.color == color
                    && king.kind == PieceKind::King
                    && let Some(rook) = p.piece_at(rs)
                    && rook.color == color
                    && rook.kind == PieceKind::Rook
                {
                    p.set_piece(ks, Some(Piece::new(color, PieceKind::King)));
                    p.set_piece(rs, Some(Piece::new(color, PieceKind::Rook)));
                }
            }
        }

        for color in [Color::White, Color::Black] {
            let kings = p
                .pieces()
                .filter(|(_, pc)| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(ChessError::InvalidFen(format!("{color} has {kings} kings")));
            }
        }

        Ok(p)
    }

    /// FEN placement field.
    pub fn placement_fen(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match Square::new(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// FEN castling field derived from has-moved flags.
    pub fn castling_fen(&self) -> String {
        let mut out = String::new();
        for color in [Color::White, Color::Black] {
            for (rook_file, flag) in [(7, 'k'), (0, 'q')] {
                if self.castling_pieces_unmoved(color, rook_file) {
                    out.push(match color {
                        Color::White => flag.to_ascii_uppercase(),
                        Color::Black => flag,
                    });
                }
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    /// True if the king and the rook on `rook_file` both stand unmoved on their home squares.
    pub(crate) fn castling_pieces_unmoved(&self, color: Color, rook_file: i8) -> bool {
        let rank = color.home_rank();
        let unmoved = |file: i8, kind: PieceKind| {
            Square::new(file, rank)
                .and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc == Piece::new(color, kind))
        };
        unmoved(4, PieceKind::King) && unmoved(rook_file, PieceKind::Rook)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    #[inline]
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq.index()] = pc;
    }

    fn take(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].take()
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .iter()
            .filter_map(|&s| self.piece_at(s).map(|pc| (s, pc)))
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let is = |s: Square, kinds: &[PieceKind]| {
            self.piece_at(s)
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn attacks diagonally forward, so look one rank behind the target.
        let back = -by.forward();
        for df in [-1, 1] {
            if let Some(s) = target.offset(df, back)
                && is(s, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        for &(df, dr) in &KNIGHT_DELTAS {
            if let Some(s) = target.offset(df, dr)
                && is(s, &[PieceKind::Knight])
            {
                return true;
            }
        }

        for &(df, dr) in &KING_DELTAS {
            if let Some(s) = target.offset(df, dr)
                && is(s, &[PieceKind::King])
            {
                return true;
            }
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for &(df, dr) in dirs {
                let mut cur = target.offset(df, dr);
                while let Some(s) = cur {
                    if self.piece_at(s).is_some() {
                        if is(s, &sliders) {
                            return true;
                        }
                        break;
                    }
                    cur = s.offset(df, dr);
                }
            }
        }

        false
    }

    /// Moves a piece, executing en passant, castling and promotion as the
    /// geometry demands. Returns `None` when `from` is empty.
    ///
    /// No legality checks happen here.
    pub fn play(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
        en_passant: Option<Square>,
    ) -> Option<(Position, Move)> {
        let piece = self.piece_at(from)?;
        let mut next = self.clone();
        let mut captured = self.piece_at(to);
        let mut is_en_passant = false;
        let mut is_castling = false;

        if piece.kind == PieceKind::Pawn
            && en_passant == Some(to)
            && captured.is_none()
            && let Some(behind) = to.offset(0, -piece.color.forward())
        {
            captured = next.take(behind);
            is_en_passant = true;
        }

        if piece.kind == PieceKind::King && (to.file() - from.file()).abs() == 2 {
            let (rook_from, rook_to) = if to.file() > from.file() { (7, 5) } else { (0, 3) };
            if let (Some(rf), Some(rt)) = (
                Square::new(rook_from, from.rank()),
                Square::new(rook_to, from.rank()),
            ) && let Some(rook) = next.take(rf)
            {
                next.set_piece(rt, Some(rook.moved()));
                is_castling = true;
            }
        }

        let mut placed = piece.moved();
        let mut promoted = None;
        if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
            let kind = promotion.unwrap_or(PieceKind::Queen);
            placed.kind = kind;
            promoted = Some(kind);
        }

        next.set_piece(from, None);
        next.set_piece(to, Some(placed));

        Some((
            next,
            Move {
                from,
                to,
                piece,
                captured,
                is_en_passant,
                is_castling,
                promotion: promoted,
            },
        ))
    }

    /// Placement signature for repetition detection.
    ///
    /// Only color and kind per square contribute; has-moved flags, side to
    /// move and counters are ignored.
    pub fn signature(&self) -> u64 {
        self.pieces()
            .fold(0, |h, (s, pc)| h ^ ZOBRIST.piece_key(pc, s))
    }

    /// Bare kings, king and one minor piece against a king, or two bishops
    /// on the same square color with nothing else.
    pub fn has_insufficient_material(&self) -> bool {
        let others: Vec<(Square, Piece)> = self
            .pieces()
            .filter(|(_, pc)| pc.kind != PieceKind::King)
            .collect();

        match others.as_slice() {
            [] => true,
            [(_, pc)] => pc.kind.is_minor(),
            [(s1, a), (s2, b)] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && s1.is_light() == s2.is_light()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;

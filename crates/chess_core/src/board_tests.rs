use super::*;

fn s(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_initial_position_layout() {
    let p = initial_position();
    assert_eq!(p.pieces().count(), 32);
    assert_eq!(
        p.piece_at(s("e1")),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        p.piece_at(s("d8")),
        Some(Piece::new(Color::Black, PieceKind::Queen))
    );
    assert!(p.pieces().all(|(_, pc)| !pc.has_moved));
    assert_eq!(p.placement_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    assert_eq!(p.castling_fen(), "KQkq");
}

#[test]
fn test_square_round_trip_and_errors() {
    let e4 = s("e4");
    assert_eq!((e4.file(), e4.rank()), (4, 3));
    assert_eq!(e4.to_string(), "e4");
    assert_eq!(Square::new(8, 0), None);
    assert!("z9".parse::<Square>().is_err());
    assert!("".parse::<Square>().is_err());
}

#[test]
fn test_square_colors() {
    assert!(!s("a1").is_light());
    assert!(s("h1").is_light());
    assert!(!s("h8").is_light());
}

#[test]
fn test_fen_derives_has_moved_from_castling_field() {
    let p = Position::from_fen_fields("r3k2r/8/8/8/8/8/8/R3K2R", "Kq").unwrap();
    assert!(!p.piece_at(s("e1")).unwrap().has_moved);
    assert!(!p.piece_at(s("h1")).unwrap().has_moved);
    assert!(p.piece_at(s("a1")).unwrap().has_moved);
    assert!(!p.piece_at(s("a8")).unwrap().has_moved);
    assert!(p.piece_at(s("h8")).unwrap().has_moved);
    assert_eq!(p.castling_fen(), "Kq");
}

#[test]
fn test_fen_rejects_bad_boards() {
    assert!(Position::from_fen_fields("8/8/8/8/8/8/8", "-").is_err());
    assert!(Position::from_fen_fields("9/8/8/8/8/8/8/8", "-").is_err());
    assert!(Position::from_fen_fields("4k3/8/8/8/8/8/8/8", "-").is_err());
    assert!(Position::from_fen_fields("4k3/8/8/8/8/8/8/4K2X", "-").is_err());
    assert!(Position::from_fen_fields("4k3/08/8/8/8/8/8/4K3", "-").is_err());
    assert!(Position::from_fen_fields("4k3/44/8/8/8/8/8/4K3", "-").is_ok());
    assert!(matches!(
        Position::from_fen_fields("9999999999999999/8/8/8/8/8/8/8", "-"),
        Err(ChessError::InvalidFen(_))
    ));
}

#[test]
fn test_pawn_attacks_only_forward_diagonals() {
    let p = Position::from_fen_fields("4k3/8/8/8/3P4/8/8/4K3", "-").unwrap();
    assert!(p.is_square_attacked(s("c5"), Color::White));
    assert!(p.is_square_attacked(s("e5"), Color::White));
    assert!(!p.is_square_attacked(s("d5"), Color::White));
    assert!(!p.is_square_attacked(s("c3"), Color::White));
}

#[test]
fn test_slider_attacks_respect_blockers() {
    let p = Position::from_fen_fields("4k3/8/8/8/R2n3K/8/8/8", "-").unwrap();
    assert!(p.is_square_attacked(s("c4"), Color::White));
    assert!(p.is_square_attacked(s("d4"), Color::White));
    assert!(!p.is_square_attacked(s("e4"), Color::White));
    assert!(p.is_square_attacked(s("a8"), Color::White));
}

#[test]
fn test_play_executes_castling_rook() {
    let p = Position::from_fen_fields("4k3/8/8/8/8/8/8/R3K2R", "KQ").unwrap();
    let (next, mv) = p.play(s("e1"), s("g1"), None, None).unwrap();
    assert!(mv.is_castling);
    assert_eq!(next.piece_at(s("f1")).map(|pc| pc.kind), Some(PieceKind::Rook));
    assert!(next.piece_at(s("f1")).unwrap().has_moved);
    assert_eq!(next.piece_at(s("h1")), None);
}

#[test]
fn test_play_executes_en_passant_capture() {
    let p = Position::from_fen_fields("4k3/8/8/3pP3/8/8/8/4K3", "-").unwrap();
    let (next, mv) = p.play(s("e5"), s("d6"), None, Some(s("d6"))).unwrap();
    assert!(mv.is_en_passant);
    assert_eq!(mv.captured.map(|pc| pc.kind), Some(PieceKind::Pawn));
    assert_eq!(next.piece_at(s("d5")), None);
}

#[test]
fn test_play_promotes_to_queen_by_default() {
    let p = Position::from_fen_fields("4k3/P7/8/8/8/8/8/4K3", "-").unwrap();
    let (next, mv) = p.play(s("a7"), s("a8"), None, None).unwrap();
    assert_eq!(mv.promotion, Some(PieceKind::Queen));
    assert_eq!(mv.piece.kind, PieceKind::Pawn);
    assert_eq!(next.piece_at(s("a8")).map(|pc| pc.kind), Some(PieceKind::Queen));
}

#[test]
fn test_play_from_empty_square() {
    assert!(initial_position().play(s("e4"), s("e5"), None, None).is_none());
}

use super::*;

fn s(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_new_game_state() {
    let g = Game::new();
    assert_eq!(g.side_to_move(), Color::White);
    assert_eq!(g.fullmove_number(), 1);
    assert_eq!(g.halfmove_clock(), 0);
    assert_eq!(g.status(), GameStatus::Active);
    assert!(g.history().is_empty());
    assert_eq!(
        g.to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_apply_move_leaves_original_untouched() {
    let g = Game::new();
    let next = g.apply_move(s("e2"), s("e4"), None).unwrap();
    assert_eq!(g, Game::new());
    assert_eq!(next.side_to_move(), Color::Black);
    assert_eq!(next.en_passant(), Some(s("e3")));
    assert_eq!(next.history().len(), 1);
    assert!(next.history()[0].piece.kind == PieceKind::Pawn);
    assert!(!next.history()[0].piece.has_moved);
    assert!(next.position().piece_at(s("e4")).unwrap().has_moved);
}

#[test]
fn test_fullmove_increments_after_black() {
    let g = Game::new();
    let g = g.apply_move(s("g1"), s("f3"), None).unwrap();
    assert_eq!(g.fullmove_number(), 1);
    assert_eq!(g.halfmove_clock(), 1);
    let g = g.apply_move(s("g8"), s("f6"), None).unwrap();
    assert_eq!(g.fullmove_number(), 2);
    assert_eq!(g.halfmove_clock(), 2);
}

#[test]
fn test_rejects_empty_square() {
    let err = Game::new().apply_move(s("e4"), s("e5"), None).unwrap_err();
    assert_eq!(err, ChessError::EmptySquare(s("e4")));
}

#[test]
fn test_rejects_wrong_side() {
    let err = Game::new().apply_move(s("e7"), s("e5"), None).unwrap_err();
    assert_eq!(
        err,
        ChessError::WrongSide {
            square: s("e7"),
            to_move: Color::White
        }
    );
}

#[test]
fn test_rejects_illegal_destination() {
    let err = Game::new().apply_move(s("e2"), s("e5"), None).unwrap_err();
    assert_eq!(
        err,
        ChessError::IllegalMove {
            from: s("e2"),
            to: s("e5")
        }
    );
}

#[test]
fn test_rejects_king_and_pawn_promotions() {
    let g = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    for kind in [PieceKind::King, PieceKind::Pawn] {
        let err = g.apply_move(s("a7"), s("a8"), Some(kind)).unwrap_err();
        assert_eq!(err, ChessError::InvalidPromotion { requested: kind });
    }
}

#[test]
fn test_rejects_promotion_piece_on_quiet_move() {
    let err = Game::new()
        .apply_move(s("e2"), s("e4"), Some(PieceKind::Queen))
        .unwrap_err();
    assert!(matches!(err, ChessError::InvalidPromotion { .. }));
}

#[test]
fn test_underpromotion() {
    let g = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(g.requires_promotion(s("a7"), s("a8")));
    assert!(!g.requires_promotion(s("e1"), s("e2")));

    let next = g.apply_move(s("a7"), s("a8"), Some(PieceKind::Knight)).unwrap();
    let placed = next.position().piece_at(s("a8")).unwrap();
    assert_eq!(placed.kind, PieceKind::Knight);
    assert_eq!(next.history()[0].promotion, Some(PieceKind::Knight));
    assert_eq!(next.halfmove_clock(), 0);
}

#[test]
fn test_rejects_moves_after_game_over() {
    let g = Game::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    assert!(g.is_game_over());
    assert!(g.legal_moves(s("e3")).is_empty());
    assert!(g.all_legal_moves().is_empty());
    let err = g.apply_move(s("e3"), s("e2"), None).unwrap_err();
    assert!(matches!(err, ChessError::GameOver(_)));
}

#[test]
fn test_legal_moves_for_opponent_piece_is_empty() {
    let g = Game::new();
    assert!(g.legal_moves(s("e7")).is_empty());
    assert!(g.legal_moves(s("e4")).is_empty());
    assert_eq!(g.legal_moves(s("b1")).len(), 2);
}

#[test]
fn test_castling_moves_the_rook() {
    let g = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let next = g.apply_move(s("e1"), s("c1"), None).unwrap();
    let rook = next.position().piece_at(s("d1")).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(next.history()[0].is_castling);
    assert_eq!(next.position().piece_at(s("a1")), None);
    assert_eq!(next.to_fen(), "r3k2r/8/8/8/8/8/8/2KR3R b kq - 1 1");
}

#[test]
fn test_fen_round_trip_with_en_passant() {
    let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
    assert_eq!(Game::from_fen(fen).unwrap().to_fen(), fen);
}

#[test]
fn test_from_fen_errors() {
    assert!(Game::from_fen("").is_err());
    assert!(Game::from_fen("8/8/8/8/8/8/8/8 w - -").is_err());
    assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
    assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1").is_err());
    assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - many 1").is_err());
    assert!(Game::from_fen("9999999999999999/8/8/8/8/8/8/8 w - - 0 1").is_err());
}

#[test]
fn test_status_display() {
    assert_eq!(GameStatus::Active.to_string(), "Game in progress");
    assert_eq!(
        GameStatus::Checkmate {
            winner: Color::Black
        }
        .to_string(),
        "Checkmate! Black wins!"
    );
    assert_eq!(GameStatus::Stalemate.to_string(), "Stalemate!");
    assert_eq!(
        GameStatus::Draw(DrawReason::ThreefoldRepetition).to_string(),
        "Draw by threefold repetition"
    );
}

#[test]
fn test_apply_legal_matches_apply_move() {
    let g = Game::new();
    for mv in g.all_legal_moves() {
        let fast = g.apply_legal(&mv);
        let checked = g.apply_move(mv.from, mv.to, mv.promotion).unwrap();
        assert_eq!(fast, checked);
    }
}

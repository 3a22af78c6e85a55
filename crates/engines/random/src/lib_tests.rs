use super::*;

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::with_rng(seeded(7));
    let game = Game::new();

    let result = engine.search(&game, SearchLimits::depth(1));

    let mv = result.best_move.unwrap();
    assert!(game.all_legal_moves().contains(&mv));
    assert_eq!(result.depth, 1);
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::with_rng(seeded(1));
    let game =
        Game::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    assert!(game.is_game_over());

    let result = engine.search(&game, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::with_rng(seeded(1));
    let game = Game::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();

    let result = engine.search(&game, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
}

#[test]
fn same_seed_same_moves() {
    let game = Game::new();
    let a: Vec<_> = {
        let mut rng = seeded(42);
        (0..10).map(|_| random_move(&game, &mut rng)).collect()
    };
    let b: Vec<_> = {
        let mut rng = seeded(42);
        (0..10).map(|_| random_move(&game, &mut rng)).collect()
    };
    assert_eq!(a, b);
}

#[test]
fn random_moves_cover_the_move_list() {
    let game = Game::new();
    let mut rng = seeded(3);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        let mv = random_move(&game, &mut rng).unwrap();
        seen.insert((mv.from, mv.to));
    }
    assert_eq!(seen.len(), 20);
}

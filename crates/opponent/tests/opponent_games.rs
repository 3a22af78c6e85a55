//! Whole games between opponent tiers.

use chess_core::Game;
use opponent::{select_move_with_rng, Opponent, OpponentConfig, Strength, TimeControlKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn play_out(white: Strength, black: Strength, max_plies: usize, seed: u64) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    for _ in 0..max_plies {
        let strength = match game.side_to_move() {
            chess_core::Color::White => white,
            chess_core::Color::Black => black,
        };
        let Some(mv) = select_move_with_rng(&game, strength, 50, TimeControlKind::Blitz, &mut rng)
        else {
            assert!(game.is_game_over());
            return game;
        };
        game = game
            .apply_move(mv.from, mv.to, mv.promotion)
            .expect("selected move must be legal");
    }
    game
}

#[test]
fn random_games_reach_a_result_or_the_ply_cap() {
    for seed in 0..4 {
        let game = play_out(Strength::Beginner, Strength::Beginner, 300, seed);
        assert!(game.is_game_over() || game.history().len() == 300);
    }
}

#[test]
fn heuristic_tiers_play_legal_games() {
    let game = play_out(Strength::Intermediate, Strength::Advanced, 120, 17);
    assert!(game.history().len() <= 120);
    assert_eq!(game.is_game_over(), game.game_result().is_terminal());
}

#[test]
fn seeded_games_replay_identically() {
    let a = play_out(Strength::Advanced, Strength::Intermediate, 60, 99);
    let b = play_out(Strength::Advanced, Strength::Intermediate, 60, 99);
    assert_eq!(a.history(), b.history());
    assert_eq!(a.to_fen(), b.to_fen());
}

#[test]
fn searching_opponent_through_worker() {
    let config = OpponentConfig {
        time_control: Some(TimeControlKind::Blitz),
        budget_ms: Some(150),
        seed: Some(3),
        ..OpponentConfig::new(Strength::Expert)
    };
    let mut cpu = Opponent::new(config).unwrap();
    let mut game = Game::new();
    for _ in 0..6 {
        let mv = cpu.choose_move(&game).unwrap();
        game = game.apply_move(mv.from, mv.to, mv.promotion).unwrap();
    }
    assert_eq!(game.history().len(), 6);
    assert_eq!(cpu.config().strength, Strength::Expert);
}

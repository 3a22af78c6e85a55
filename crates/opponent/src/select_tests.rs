use chess_core::{move_to_coord, PieceKind};

use super::*;

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn every_tier_plays_a_legal_opening_move() {
    let game = Game::new();
    for strength in Strength::ALL {
        let mut rng = seeded(u64::from(strength.tier()));
        let mv = select_move_with_rng(&game, strength, 200, TimeControlKind::Blitz, &mut rng)
            .unwrap_or_else(|| panic!("{strength} returned no move"));
        assert!(game.all_legal_moves().contains(&mv), "{strength}");
    }
}

#[test]
fn no_tier_moves_in_a_finished_game() {
    let mated = Game::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(mated.is_game_over());
    for strength in Strength::ALL {
        let mut rng = seeded(0);
        assert_eq!(
            select_move_with_rng(&mated, strength, 200, TimeControlKind::Rapid, &mut rng),
            None
        );
    }
    assert_eq!(select_move(&mated, Strength::Grandmaster, 100), None);
}

#[test]
fn searching_tiers_find_mate_in_one() {
    let game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    for strength in [Strength::Expert, Strength::Master, Strength::Grandmaster] {
        let mut rng = seeded(5);
        let mv = select_move_with_rng(&game, strength, 2_000, TimeControlKind::Blitz, &mut rng)
            .unwrap();
        assert_eq!(move_to_coord(&mv), "e1e8", "{strength}");
    }
}

#[test]
fn greedy_tier_takes_free_queen() {
    let game = Game::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
    let mut rng = seeded(2);
    let mv = select_move_with_rng(
        &game,
        Strength::Intermediate,
        100,
        TimeControlKind::Classical,
        &mut rng,
    )
    .unwrap();
    assert_eq!(mv.captured.map(|p| p.kind), Some(PieceKind::Queen));
}

#[test]
fn zero_budget_still_returns_a_move() {
    let game = Game::new();
    let mut rng = seeded(1);
    let mv = select_move_with_rng(
        &game,
        Strength::Grandmaster,
        0,
        TimeControlKind::Unlimited,
        &mut rng,
    )
    .unwrap();
    assert!(game.all_legal_moves().contains(&mv));
}

#[test]
fn seeded_selection_is_reproducible() {
    let game = Game::new();
    for strength in [Strength::Beginner, Strength::Intermediate, Strength::Advanced] {
        let a = select_move_with_rng(&game, strength, 100, TimeControlKind::Blitz, &mut seeded(9));
        let b = select_move_with_rng(&game, strength, 100, TimeControlKind::Blitz, &mut seeded(9));
        assert_eq!(a, b, "{strength}");
    }
}

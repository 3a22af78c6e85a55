use crate::game::Game;

/// Counts leaf nodes of the legal move tree down to `depth`.
///
/// Finished games are leaves: a mate or a draw detected by the state
/// machine stops the count there.
pub fn perft(game: &Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.all_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(&game.apply_legal(mv), depth - 1))
        .sum()
}

/// Per-move node counts at the root, in move generation order.
pub fn perft_divide(game: &Game, depth: u8) -> Vec<(String, u64)> {
    game.all_legal_moves()
        .iter()
        .map(|mv| {
            let nodes = perft(&game.apply_legal(mv), depth.saturating_sub(1));
            (crate::notation::move_to_coord(mv), nodes)
        })
        .collect()
}

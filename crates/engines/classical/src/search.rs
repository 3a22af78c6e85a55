//! Iterative-deepening negamax with alpha-beta pruning and a capture and promotion
//! quiescence search.

use std::cmp::Reverse;

use chess_core::{move_to_coord, Game, GameStatus, Move, TimeControl};
use tracing::{debug, warn};

use crate::eval::{evaluate, piece_value};

/// Score of a mate delivered at the root; mates further away score less.
pub const MATE_SCORE: i32 = 1_000_000;
/// Any score at or beyond this magnitude is a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;
const INFINITY: i32 = i32::MAX / 2;

/// How many moves are searched at a node, by remaining depth.
///
/// Depth 1 is never truncated. Moves are ordered before the cut, so the
/// survivors are the captures and promotions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchLimits {
    pub depth_2: usize,
    pub depth_3: usize,
    pub depth_4_plus: usize,
}

impl BranchLimits {
    pub const UNLIMITED: BranchLimits = BranchLimits {
        depth_2: usize::MAX,
        depth_3: usize::MAX,
        depth_4_plus: usize::MAX,
    };

    pub fn at_depth(&self, depth: u8) -> usize {
        match depth {
            0 | 1 => usize::MAX,
            2 => self.depth_2,
            3 => self.depth_3,
            _ => self.depth_4_plus,
        }
    }
}

/// Knobs for one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Truncation applied to the root move list.
    pub root_limits: BranchLimits,
    /// Truncation applied below the root.
    pub inner_limits: BranchLimits,
    /// Captures and promotions examined per quiescence node.
    pub quiescence_captures: usize,
    /// Plies of quiescence beyond the nominal horizon.
    pub quiescence_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            root_limits: BranchLimits {
                depth_2: 28,
                depth_3: 18,
                depth_4_plus: 12,
            },
            inner_limits: BranchLimits {
                depth_2: 30,
                depth_3: 20,
                depth_4_plus: 15,
            },
            quiescence_captures: 20,
            quiescence_depth: 6,
        }
    }
}

/// What a search call produced.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// None only when the game had no legal move.
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move.
    pub score: i32,
    /// Deepest iteration that ran to completion.
    pub completed_depth: u8,
    pub nodes: u64,
    /// True if the clock cut an iteration short.
    pub stopped: bool,
    /// True if the move comes from a shallower search than configured,
    /// or from move ordering alone when not even depth 1 finished.
    pub degraded: bool,
}

/// Ordering key: most valuable victim first, cheapest attacker breaking
/// ties, promotions boosted by the value of the new piece.
pub fn order_score(mv: &Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = mv.captured {
        score += piece_value(victim.kind) * 10 - piece_value(mv.piece.kind) / 10;
    }
    if let Some(kind) = mv.promotion {
        score += piece_value(kind);
    }
    score
}

/// Sorts moves best-first. Stable, so quiet moves keep generation order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_cached_key(|mv| Reverse(order_score(mv)));
}

struct SearchContext<'a> {
    config: &'a SearchConfig,
    tc: &'a TimeControl,
    nodes: u64,
    stopped: bool,
}

impl SearchContext<'_> {
    /// Counts a node and polls the clock every few nodes.
    fn visit(&mut self) -> bool {
        self.nodes += 1;
        if self.tc.should_check_time(self.nodes) && self.tc.check_time() {
            self.stopped = true;
        }
        self.stopped
    }
}

/// Searches `game` for the side to move.
///
/// Iterations run at depth 1, 2, ... up to `config.max_depth`. An
/// iteration that the clock interrupts is thrown away and the last
/// complete one is used. If none completed, the best-ordered move is
/// returned instead.
pub fn search(game: &Game, config: &SearchConfig, tc: &TimeControl) -> SearchOutcome {
    let mut moves = game.all_legal_moves();
    if game.is_game_over() || moves.is_empty() {
        return SearchOutcome::default();
    }
    order_moves(&mut moves);

    let mut ctx = SearchContext {
        config,
        tc,
        nodes: 0,
        stopped: false,
    };
    let mut best: Option<(Move, i32)> = None;
    let mut completed_depth = 0;

    for depth in 1..=config.max_depth.max(1) {
        if tc.check_time() {
            ctx.stopped = true;
            break;
        }
        let Some((mv, score)) = search_root(game, &moves, depth, &mut ctx) else {
            break;
        };
        best = Some((mv, score));
        completed_depth = depth;
        debug!(
            depth,
            score,
            nodes = ctx.nodes,
            best = %move_to_coord(&mv),
            "iteration complete"
        );

        // Search the previous best first next time round.
        if let Some(i) = moves.iter().position(|m| *m == mv) {
            moves[..=i].rotate_right(1);
        }
        if score.abs() >= MATE_THRESHOLD {
            break;
        }
    }

    match best {
        Some((mv, score)) => {
            let degraded = ctx.stopped && completed_depth < config.max_depth;
            if degraded {
                debug!(
                    completed_depth,
                    max_depth = config.max_depth,
                    "search cut short by the clock"
                );
            }
            SearchOutcome {
                best_move: Some(mv),
                score,
                completed_depth,
                nodes: ctx.nodes,
                stopped: ctx.stopped,
                degraded,
            }
        }
        None => {
            let mv = moves[0];
            warn!(
                best = %move_to_coord(&mv),
                elapsed_ms = tc.elapsed().as_millis() as u64,
                "no search iteration completed, falling back to move ordering"
            );
            SearchOutcome {
                best_move: Some(mv),
                score: 0,
                completed_depth: 0,
                nodes: ctx.nodes,
                stopped: true,
                degraded: true,
            }
        }
    }
}

fn search_root(
    game: &Game,
    moves: &[Move],
    depth: u8,
    ctx: &mut SearchContext,
) -> Option<(Move, i32)> {
    let limit = ctx.config.root_limits.at_depth(depth).min(moves.len());
    let mut alpha = -INFINITY;
    let mut best = None;

    for mv in &moves[..limit.max(1)] {
        let child = game.apply_legal(mv);
        let score = -negamax(&child, depth - 1, -INFINITY, -alpha, 1, ctx);
        if ctx.stopped {
            return None;
        }
        if best.is_none() || score > alpha {
            alpha = score;
            best = Some((*mv, score));
        }
    }
    best
}

/// Score of a finished game from the side to move's point of view.
fn terminal_score(game: &Game, ply: i32) -> Option<i32> {
    match game.status() {
        GameStatus::Active => None,
        // The side to move has been mated.
        GameStatus::Checkmate { .. } => Some(-(MATE_SCORE - ply)),
        GameStatus::Stalemate | GameStatus::Draw(_) => Some(0),
    }
}

fn negamax(
    game: &Game,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ply: i32,
    ctx: &mut SearchContext,
) -> i32 {
    if ctx.visit() {
        return 0;
    }
    if let Some(score) = terminal_score(game, ply) {
        return score;
    }
    if depth == 0 {
        return quiescence(game, alpha, beta, ply, 0, ctx);
    }

    let mut moves = game.all_legal_moves();
    order_moves(&mut moves);
    moves.truncate(ctx.config.inner_limits.at_depth(depth));

    let mut best = -INFINITY;
    for mv in &moves {
        let child = game.apply_legal(mv);
        let score = -negamax(&child, depth - 1, -beta, -alpha, ply + 1, ctx);
        if ctx.stopped {
            return 0;
        }
        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

fn quiescence(
    game: &Game,
    mut alpha: i32,
    beta: i32,
    ply: i32,
    qdepth: u8,
    ctx: &mut SearchContext,
) -> i32 {
    if ctx.visit() {
        return 0;
    }
    if let Some(score) = terminal_score(game, ply) {
        return score;
    }

    let stand_pat = evaluate(game, game.side_to_move());
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if qdepth >= ctx.config.quiescence_depth {
        return alpha;
    }

    // Promotions change material as much as captures do.
    let mut noisy: Vec<Move> = game
        .all_legal_moves()
        .into_iter()
        .filter(|mv| mv.is_capture() || mv.is_promotion())
        .collect();
    order_moves(&mut noisy);
    noisy.truncate(ctx.config.quiescence_captures);

    for mv in &noisy {
        let child = game.apply_legal(mv);
        let score = -quiescence(&child, -beta, -alpha, ply + 1, qdepth + 1, ctx);
        if ctx.stopped {
            return 0;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;

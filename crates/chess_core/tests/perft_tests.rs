use rayon::prelude::*;

use chess_core::{perft, perft_divide, Game};

/// Depths whose expected count exceeds this are skipped unless
/// `PERFT_DEEP` is set in the environment.
const SHALLOW_NODE_CAP: u64 = 250_000;

struct PerftCase {
    line: usize,
    fen: String,
    counts: Vec<(u8, u64)>,
}

/// Parses `<fen> ;D1 20 ;D2 400 ...` into a case. Blank lines yield None.
fn parse_case(line: usize, text: &str) -> Option<PerftCase> {
    let mut fields = text.split(';').map(str::trim);
    let fen = fields.next().filter(|f| !f.is_empty())?.to_string();

    let mut counts: Vec<(u8, u64)> = fields
        .filter_map(|field| {
            let (label, nodes) = field.split_once(' ')?;
            let depth = label.strip_prefix('D')?.parse().ok()?;
            let nodes = nodes.trim().parse().ok()?;
            Some((depth, nodes))
        })
        .collect();
    counts.sort_unstable();

    (!counts.is_empty()).then_some(PerftCase { line, fen, counts })
}

fn load_cases() -> Vec<PerftCase> {
    include_str!("standard.epd")
        .lines()
        .enumerate()
        .filter_map(|(i, text)| parse_case(i + 1, text.trim()))
        .collect()
}

#[test]
fn epd_file_parses() {
    let cases = load_cases();
    assert_eq!(cases.len(), 5);
    assert_eq!(cases[0].counts[0], (1, 20));
    assert!(cases.iter().all(|c| Game::from_fen(&c.fen).is_ok()));
}

#[test]
fn node_counts_match_reference_positions() {
    let deep = std::env::var_os("PERFT_DEEP").is_some();

    let failures: Vec<String> = load_cases()
        .par_iter()
        .flat_map_iter(|case| {
            let game = Game::from_fen(&case.fen)
                .unwrap_or_else(|err| panic!("line {}: bad FEN: {err}", case.line));
            case.counts
                .iter()
                .filter(move |(_, nodes)| deep || *nodes <= SHALLOW_NODE_CAP)
                .filter_map(move |&(depth, expected)| {
                    let got = perft(&game, depth);
                    (got != expected).then(|| {
                        format!("line {} depth {depth}: expected {expected}, got {got}", case.line)
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect();

    assert!(failures.is_empty(), "perft mismatches:\n{}", failures.join("\n"));
}

#[test]
fn divide_splits_the_start_position() {
    let split = perft_divide(&Game::new(), 3);
    assert_eq!(split.len(), 20);

    let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
    assert_eq!(total, 8902);

    let nodes_after = |coord: &str| {
        split
            .iter()
            .find(|(mv, _)| mv == coord)
            .map(|(_, nodes)| *nodes)
    };
    assert_eq!(nodes_after("e2e4"), Some(600));
    assert_eq!(nodes_after("g1f3"), Some(440));
}

#[test]
fn finished_game_is_a_leaf() {
    let mated = Game::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(perft(&mated, 0), 1);
    assert_eq!(perft(&mated, 3), 0);
}

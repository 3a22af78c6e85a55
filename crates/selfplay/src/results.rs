//! Self-play results storage and reporting

use std::path::Path;

use chess_core::{Color, Game, GameStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::match_runner::MatchConfig;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to access results file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode or decode results: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
    /// The ply cap was reached first; scored as a draw.
    Unfinished,
}

impl GameOutcome {
    pub fn from_status(status: GameStatus) -> Self {
        match status.winner() {
            Some(Color::White) => GameOutcome::WhiteWins,
            Some(Color::Black) => GameOutcome::BlackWins,
            None if status.is_terminal() => GameOutcome::Draw,
            None => GameOutcome::Unfinished,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameOutcome::WhiteWins => "1-0",
            GameOutcome::BlackWins => "0-1",
            GameOutcome::Draw => "1/2-1/2",
            GameOutcome::Unfinished => "*",
        }
    }
}

/// One game as played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    /// Moves in coordinate notation, e.g. `e2e4`, `e7e8q`.
    pub moves: Vec<String>,
    pub outcome: GameOutcome,
    /// Human-readable reason the game stopped.
    pub termination: String,
    pub final_fen: String,
}

impl GameRecord {
    pub fn from_game(white: &str, black: &str, game: &Game, moves: Vec<String>) -> Self {
        let outcome = GameOutcome::from_status(game.status());
        let termination = match outcome {
            GameOutcome::Unfinished => "Move limit reached".to_string(),
            _ => game.status().to_string(),
        };
        Self {
            white: white.to_string(),
            black: black.to_string(),
            moves,
            outcome,
            termination,
            final_fen: game.to_fen(),
        }
    }
}

/// Running score from the first player's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Games cut off by the ply cap; also counted in `draws`.
    pub unfinished: u32,
}

impl Tally {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// 1 for a win, 0.5 for a draw, 0 for a loss, averaged.
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    fn record(&mut self, outcome: GameOutcome, first_player_white: bool) {
        match (outcome, first_player_white) {
            (GameOutcome::WhiteWins, true) | (GameOutcome::BlackWins, false) => self.wins += 1,
            (GameOutcome::WhiteWins, false) | (GameOutcome::BlackWins, true) => self.losses += 1,
            (GameOutcome::Draw, _) => self.draws += 1,
            (GameOutcome::Unfinished, _) => {
                self.draws += 1;
                self.unfinished += 1;
            }
        }
    }
}

/// Complete results of a self-play match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResults {
    /// Label of the first player (white in game one)
    pub first: String,
    /// Label of the second player
    pub second: String,
    /// Configuration used
    pub config: MatchConfig,
    pub games: Vec<GameRecord>,
    pub tally: Tally,
}

impl MatchResults {
    pub fn new(first: &str, second: &str, config: MatchConfig) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            config,
            games: Vec::new(),
            tally: Tally::default(),
        }
    }

    /// Add a finished game
    pub fn add_game(&mut self, record: GameRecord, first_player_white: bool) {
        self.tally.record(record.outcome, first_player_white);
        self.games.push(record);
    }

    /// Save results to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from a JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} vs {} ===\n\n", self.first, self.second));
        report.push_str(&format!(
            "Config: {} games, {} ply cap, colors {}\n\n",
            self.config.games,
            self.config.max_plies,
            if self.config.alternate_colors {
                "alternate"
            } else {
                "fixed"
            }
        ));

        report.push_str(&format!(
            "{:<4} {:<14} {:<14} {:<8} {:>6}  {}\n",
            "#", "White", "Black", "Result", "Plies", "Termination"
        ));
        report.push_str(&"-".repeat(72));
        report.push('\n');
        for (i, game) in self.games.iter().enumerate() {
            report.push_str(&format!(
                "{:<4} {:<14} {:<14} {:<8} {:>6}  {}\n",
                i + 1,
                game.white,
                game.black,
                game.outcome.as_str(),
                game.moves.len(),
                game.termination
            ));
        }

        let t = &self.tally;
        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws ({} unfinished)\n",
            self.first, t.wins, t.losses, t.draws, t.unfinished
        ));
        report.push_str(&format!("Score: {:.1}%\n", t.score() * 100.0));
        report
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;

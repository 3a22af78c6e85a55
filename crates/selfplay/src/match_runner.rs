//! Match runner for playing games between opponents

use std::path::Path;

use chess_core::{move_to_coord, Color, Game};
use opponent::{ConfigError, Opponent, OpponentConfig, Strength, WorkerError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::results::{GameRecord, MatchResults};

/// Configuration for a match
///
/// ```toml
/// games = 4
/// max_plies = 160
///
/// [white]
/// strength = "master"
///
/// [black]
/// strength = "advanced"
/// seed = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// First player; plays white in game one.
    pub white: OpponentConfig,
    /// Second player.
    pub black: OpponentConfig,
    /// Number of games to play
    pub games: u32,
    /// Plies per game before it is scored as unfinished
    pub max_plies: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            white: OpponentConfig::new(Strength::Expert),
            black: OpponentConfig::new(Strength::Advanced),
            games: 2,
            max_plies: 200,
            alternate_colors: true,
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

fn player_label(config: &OpponentConfig) -> String {
    config.strength.to_string()
}

/// Runs matches between two configured opponents
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run the match. Fails only if a search worker cannot be started.
    pub fn run(&self) -> Result<MatchResults, WorkerError> {
        let first_label = player_label(&self.config.white);
        let second_label = player_label(&self.config.black);
        let mut first = Opponent::new(self.config.white.clone())?;
        let mut second = Opponent::new(self.config.black.clone())?;
        let mut results = MatchResults::new(&first_label, &second_label, self.config.clone());

        info!(
            first = %first_label,
            second = %second_label,
            games = self.config.games,
            "match started"
        );

        for game_num in 0..self.config.games {
            // Alternate colors if configured
            let first_white = !self.config.alternate_colors || game_num % 2 == 0;

            let record = if first_white {
                self.play_game((&mut first, &first_label), (&mut second, &second_label))
            } else {
                self.play_game((&mut second, &second_label), (&mut first, &first_label))
            };

            info!(
                game = game_num + 1,
                of = self.config.games,
                white = %record.white,
                black = %record.black,
                result = record.outcome.as_str(),
                plies = record.moves.len(),
                "game finished"
            );
            results.add_game(record, first_white);
        }

        Ok(results)
    }

    /// Play a single game from the starting position.
    pub fn play_game(
        &self,
        white: (&mut Opponent, &str),
        black: (&mut Opponent, &str),
    ) -> GameRecord {
        let (white_player, white_label) = white;
        let (black_player, black_label) = black;
        let mut game = Game::new();
        let mut moves = Vec::new();

        while !game.is_game_over() && moves.len() < self.config.max_plies as usize {
            let mover = match game.side_to_move() {
                Color::White => &mut *white_player,
                Color::Black => &mut *black_player,
            };
            let Some(mv) = mover.choose_move(&game) else {
                break;
            };
            match game.apply_move(mv.from, mv.to, mv.promotion) {
                Ok(next) => {
                    moves.push(move_to_coord(&mv));
                    game = next;
                }
                Err(err) => {
                    warn!(error = %err, mv = %move_to_coord(&mv), "opponent returned a rejected move");
                    break;
                }
            }
        }

        GameRecord::from_game(white_label, black_label, &game, moves)
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;

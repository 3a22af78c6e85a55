//! Opponent configuration, loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::strength::{Strength, TimeControlKind};
use crate::worker::DEFAULT_GRACE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid opponent config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How one computer opponent plays.
///
/// ```toml
/// strength = "master"
/// time_control = "rapid"
/// budget_ms = 900
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    pub strength: Strength,
    /// Clock the opponent plays under; derived from the strength if unset.
    pub time_control: Option<TimeControlKind>,
    /// Per-move budget; the tier's recommendation if unset.
    pub budget_ms: Option<u64>,
    /// How long past the budget the caller waits for the worker.
    pub worker_grace_ms: u64,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            strength: Strength::default(),
            time_control: None,
            budget_ms: None,
            worker_grace_ms: DEFAULT_GRACE.as_millis() as u64,
            seed: None,
        }
    }
}

impl OpponentConfig {
    pub fn new(strength: Strength) -> Self {
        Self {
            strength,
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn effective_time_control(&self) -> TimeControlKind {
        self.time_control
            .unwrap_or_else(|| TimeControlKind::default_for(self.strength, false))
    }

    pub fn effective_budget_ms(&self) -> u64 {
        self.budget_ms.unwrap_or_else(|| {
            self.strength
                .recommended_budget_ms(self.effective_time_control().is_blitz())
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

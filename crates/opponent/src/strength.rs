//! Opponent strength tiers and the search profile behind each one.

use std::fmt;
use std::str::FromStr;

use classical_engine::{BranchLimits, SearchConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Six strength tiers, weakest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Beginner = 1,
    #[default]
    Intermediate = 2,
    Advanced = 3,
    Expert = 4,
    Master = 5,
    Grandmaster = 6,
}

/// How a tier picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Random,
    Greedy,
    Tactical,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrengthError {
    #[error("unknown strength '{0}'")]
    Unknown(String),
    #[error("strength tier {0} is out of range 1..=6")]
    OutOfRange(u8),
}

impl Strength {
    pub const ALL: [Strength; 6] = [
        Strength::Beginner,
        Strength::Intermediate,
        Strength::Advanced,
        Strength::Expert,
        Strength::Master,
        Strength::Grandmaster,
    ];

    #[inline]
    pub fn tier(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Beginner => "beginner",
            Strength::Intermediate => "intermediate",
            Strength::Advanced => "advanced",
            Strength::Expert => "expert",
            Strength::Master => "master",
            Strength::Grandmaster => "grandmaster",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Strength::Beginner => "Plays random legal moves",
            Strength::Intermediate => "Grabs the biggest capture it can see",
            Strength::Advanced => "Weighs captures, the centre and development",
            Strength::Expert => "Searches a few moves ahead",
            Strength::Master => "Searches deeper with a wider move list",
            Strength::Grandmaster => "Deepest search the clock allows",
        }
    }

    /// Rough playing strength shown next to the tier.
    pub fn nominal_elo(self) -> u32 {
        400 + 400 * u32::from(self.tier())
    }

    pub fn strategy(self) -> Strategy {
        match self {
            Strength::Beginner => Strategy::Random,
            Strength::Intermediate => Strategy::Greedy,
            Strength::Advanced => Strategy::Tactical,
            Strength::Expert | Strength::Master | Strength::Grandmaster => Strategy::Search,
        }
    }

    /// Default per-move budget handed to the worker.
    pub fn recommended_budget_ms(self, blitz: bool) -> u64 {
        match (self, blitz) {
            (Strength::Beginner, false) => 150,
            (Strength::Intermediate, false) => 250,
            (Strength::Advanced, false) => 400,
            (Strength::Expert, false) => 600,
            (Strength::Master, false) => 800,
            (Strength::Grandmaster, false) => 1000,
            (Strength::Beginner, true) => 100,
            (Strength::Intermediate, true) => 150,
            (Strength::Advanced, true) => 250,
            (Strength::Expert, true) => 350,
            (Strength::Master, true) => 450,
            (Strength::Grandmaster, true) => 500,
        }
    }

    /// Search settings; None for the tiers that do not search.
    pub fn search_profile(self, time_control: TimeControlKind) -> Option<SearchProfile> {
        SearchProfile::for_tier(self, time_control)
    }
}

impl TryFrom<u8> for Strength {
    type Error = StrengthError;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        Strength::ALL
            .get(usize::from(tier).wrapping_sub(1))
            .copied()
            .ok_or(StrengthError::OutOfRange(tier))
    }
}

impl FromStr for Strength {
    type Err = StrengthError;

    /// Accepts a tier name in any case or a tier number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(tier) = s.parse::<u8>() {
            return Strength::try_from(tier);
        }
        Strength::ALL
            .into_iter()
            .find(|st| st.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| StrengthError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The game clock the opponent is playing under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeControlKind {
    Blitz,
    Rapid,
    #[default]
    Classical,
    Unlimited,
}

impl TimeControlKind {
    pub fn initial_ms(self) -> u64 {
        match self {
            TimeControlKind::Blitz => 3 * 60_000,
            TimeControlKind::Rapid => 10 * 60_000,
            TimeControlKind::Classical => 30 * 60_000,
            TimeControlKind::Unlimited => 0,
        }
    }

    pub fn increment_ms(self) -> u64 {
        match self {
            TimeControlKind::Blitz => 2_000,
            TimeControlKind::Rapid => 5_000,
            TimeControlKind::Classical => 30_000,
            TimeControlKind::Unlimited => 0,
        }
    }

    #[inline]
    pub fn is_blitz(self) -> bool {
        self == TimeControlKind::Blitz
    }

    /// Clock assumed when the caller only says whether the game is blitz.
    pub fn default_for(strength: Strength, blitz: bool) -> Self {
        if blitz {
            TimeControlKind::Blitz
        } else if strength == Strength::Grandmaster {
            TimeControlKind::Rapid
        } else {
            TimeControlKind::Classical
        }
    }
}

/// Depth, thinking time and branch limits for a searching tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProfile {
    pub max_depth: u8,
    pub think_time_ms: u64,
    pub root_limits: BranchLimits,
    pub inner_limits: BranchLimits,
}

const fn limits(depth_2: usize, depth_3: usize, depth_4_plus: usize) -> BranchLimits {
    BranchLimits {
        depth_2,
        depth_3,
        depth_4_plus,
    }
}

impl SearchProfile {
    pub fn for_tier(strength: Strength, time_control: TimeControlKind) -> Option<Self> {
        use TimeControlKind::*;

        let (max_depth, think_time_ms) = match (strength, time_control) {
            (Strength::Expert, Blitz) => (2, 300),
            (Strength::Expert, Rapid) => (3, 700),
            (Strength::Expert, Classical) => (3, 1200),
            (Strength::Expert, Unlimited) => (4, 2500),
            (Strength::Master, Blitz) => (2, 350),
            (Strength::Master, Rapid) => (3, 900),
            (Strength::Master, Classical) => (4, 1500),
            (Strength::Master, Unlimited) => (4, 3000),
            (Strength::Grandmaster, Blitz) => (4, 250),
            (Strength::Grandmaster, Rapid) => (5, 1200),
            (Strength::Grandmaster, Classical) => (6, 2000),
            (Strength::Grandmaster, Unlimited) => (7, 4000),
            _ => return None,
        };
        let (root_limits, inner_limits) = match strength {
            Strength::Expert => (limits(24, 16, 10), limits(26, 18, 12)),
            Strength::Master => (limits(28, 18, 12), limits(30, 20, 15)),
            _ => (limits(32, 22, 14), limits(34, 24, 18)),
        };

        Some(Self {
            max_depth,
            think_time_ms,
            root_limits,
            inner_limits,
        })
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.max_depth,
            root_limits: self.root_limits,
            inner_limits: self.inner_limits,
            ..SearchConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "strength_tests.rs"]
mod strength_tests;

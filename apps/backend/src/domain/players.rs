//! Player identity and cumulative career statistics.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::domain::overs::Overs;
use crate::domain::state::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    #[serde(rename = "All-rounder")]
    AllRounder,
}

/// Bowling figure for one match, shown as `wickets-runs`.
///
/// Ordering puts the better figure last: more wickets wins, then fewer runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BowlingFigure {
    pub wickets: u32,
    pub runs: u32,
}

impl BowlingFigure {
    pub const fn new(wickets: u32, runs: u32) -> Self {
        Self { wickets, runs }
    }

    /// The better of two figures.
    pub fn best(self, other: BowlingFigure) -> BowlingFigure {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl Ord for BowlingFigure {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wickets
            .cmp(&other.wickets)
            .then_with(|| other.runs.cmp(&self.runs))
    }
}

impl PartialOrd for BowlingFigure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BowlingFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wickets, self.runs)
    }
}

/// Cumulative career record. Mutated only when a match is finalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
    pub balls_faced: u32,
    pub overs_bowled: Overs,
    pub runs_conceded: u32,
    pub times_out: u32,
    pub best_score: u32,
    /// Unset until the player has bowled in a finalized match.
    pub best_bowling: Option<BowlingFigure>,
    pub batting_average: f64,
    pub strike_rate: f64,
    pub bowling_economy: f64,
}

impl PlayerStats {
    /// Recompute the derived rates from the running sums.
    ///
    /// A batsman never dismissed averages their total runs.
    pub fn recompute_rates(&mut self) {
        self.batting_average = if self.times_out > 0 {
            self.runs as f64 / self.times_out as f64
        } else {
            self.runs as f64
        };
        self.strike_rate = if self.balls_faced > 0 {
            self.runs as f64 / self.balls_faced as f64 * 100.0
        } else {
            0.0
        };
        self.bowling_economy = if self.overs_bowled.balls() > 0 {
            self.runs_conceded as f64 / self.overs_bowled.as_decimal()
        } else {
            0.0
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: PlayerRole,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            stats: PlayerStats::default(),
        }
    }
}

/// Uniqueness key for a display name: trimmed, NFKC normalized, lowercased.
pub fn name_key(name: &str) -> String {
    name.trim().nfkc().collect::<String>().to_lowercase()
}

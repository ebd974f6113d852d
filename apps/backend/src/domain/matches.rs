//! Match record, team totals and the two-innings scorecard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::overs::Overs;
use crate::domain::state::{MatchId, PlayerId};

/// One of the two sides in a match, by position in `Match::teams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamIndex {
    First,
    Second,
}

impl TeamIndex {
    pub const fn index(self) -> usize {
        match self {
            TeamIndex::First => 0,
            TeamIndex::Second => 1,
        }
    }

    pub const fn other(self) -> TeamIndex {
        match self {
            TeamIndex::First => TeamIndex::Second,
            TeamIndex::Second => TeamIndex::First,
        }
    }
}

/// Innings number; a match has exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InningsNo {
    First,
    Second,
}

impl InningsNo {
    pub const fn index(self) -> usize {
        match self {
            InningsNo::First => 0,
            InningsNo::Second => 1,
        }
    }

    /// 1-based number for display and logs.
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
}

/// A side with its fixed roster and live running totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInMatch {
    pub name: String,
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub wickets: u32,
    #[serde(default)]
    pub overs: Overs,
    #[serde(default)]
    pub innings_completed: bool,
}

impl TeamInMatch {
    pub fn new(name: impl Into<String>, players: Vec<PlayerId>) -> Self {
        Self {
            name: name.into(),
            players,
            runs: 0,
            wickets: 0,
            overs: Overs::ZERO,
            innings_completed: false,
        }
    }

    /// Wickets at which the side is all out: one batsman always survives.
    pub fn all_out_at(&self) -> u32 {
        (self.players.len() as u32).saturating_sub(1)
    }

    pub fn wickets_in_hand(&self) -> u32 {
        self.all_out_at().saturating_sub(self.wickets)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingEntry {
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub out: bool,
}

impl BattingEntry {
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.runs as f64 / self.balls as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlingEntry {
    pub runs: u32,
    pub overs: Overs,
    pub wickets: u32,
}

impl BowlingEntry {
    pub fn economy(&self) -> f64 {
        if self.overs.balls() == 0 {
            0.0
        } else {
            self.runs as f64 / self.overs.as_decimal()
        }
    }
}

/// One team's turn at batting.
///
/// Entries are created on a player's first ball faced or bowled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innings {
    pub team: Option<String>,
    pub batting: BTreeMap<PlayerId, BattingEntry>,
    pub bowling: BTreeMap<PlayerId, BowlingEntry>,
    pub extras: u32,
}

impl Innings {
    pub fn batting_entry(&mut self, player: &PlayerId) -> &mut BattingEntry {
        self.batting.entry(player.clone()).or_default()
    }

    pub fn bowling_entry(&mut self, player: &PlayerId) -> &mut BowlingEntry {
        self.bowling.entry(player.clone()).or_default()
    }

    pub fn is_out(&self, player: &PlayerId) -> bool {
        self.batting.get(player).is_some_and(|entry| entry.out)
    }

    /// Runs re-derived from the individual entries plus extras.
    pub fn derived_runs(&self) -> u32 {
        self.batting.values().map(|b| b.runs).sum::<u32>() + self.extras
    }

    pub fn derived_wickets(&self) -> u32 {
        self.batting.values().filter(|b| b.out).count() as u32
    }

    /// Legal balls re-derived from the bowling entries.
    pub fn derived_overs(&self) -> Overs {
        self.bowling
            .values()
            .fold(Overs::ZERO, |acc, entry| acc + entry.overs)
    }

    pub fn runs_conceded(&self) -> u32 {
        self.bowling.values().map(|b| b.runs).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub innings: [Innings; 2],
}

impl Scorecard {
    pub fn innings(&self, no: InningsNo) -> &Innings {
        &self.innings[no.index()]
    }

    pub fn innings_mut(&mut self, no: InningsNo) -> &mut Innings {
        &mut self.innings[no.index()]
    }
}

/// Persisted match record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub overs: u32,
    pub venue: String,
    pub teams: [TeamInMatch; 2],
    pub status: MatchStatus,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub player_of_the_match: Option<PlayerId>,
    #[serde(default)]
    pub scorecard: Option<Scorecard>,
    #[serde(default)]
    pub tournament_id: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl Match {
    pub fn team(&self, index: TeamIndex) -> &TeamInMatch {
        &self.teams[index.index()]
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::finalization::TerminationReason;
use crate::domain::matches::{InningsNo, Match, Scorecard, TeamInMatch, TeamIndex};
use crate::domain::players::Player;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

pub type PlayerId = String;
pub type MatchId = String;

/// Both batsmen and the bowler are installed; the only scoring phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crease {
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
}

/// Which end of the pitch a batting slot refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreaseEnd {
    Striker,
    NonStriker,
}

/// Batting vacancy left by a wicket.
///
/// `bowler` is `None` when the wicket fell on the last ball of an over: the
/// over break is resolved after the new batsman walks in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WicketPause {
    pub survivor: PlayerId,
    pub vacancy: CreaseEnd,
    pub bowler: Option<PlayerId>,
}

impl WicketPause {
    /// (striker, non-striker) once `incoming` fills the vacancy.
    pub fn fill(&self, incoming: PlayerId) -> (PlayerId, PlayerId) {
        match self.vacancy {
            CreaseEnd::Striker => (incoming, self.survivor.clone()),
            CreaseEnd::NonStriker => (self.survivor.clone(), incoming),
        }
    }
}

/// Batsmen at the crease while the next bowler is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batsmen {
    pub striker: PlayerId,
    pub non_striker: PlayerId,
}

/// Match-level scoring phases.
///
/// Pending players are carried by the phase itself, so "who is missing" is
/// never inferred from empty slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingToss,
    /// Toss won by `LiveMatchState::toss_winner`; bat/bowl not chosen yet.
    AwaitingTossChoice,
    /// Openers and opening bowler for `LiveMatchState::current_innings`.
    /// In the second innings this is the innings break.
    AwaitingOpeningPlayers,
    InProgress(Crease),
    AwaitingNewBatsman(WicketPause),
    AwaitingNewBowler(Batsmen),
    Completed,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingToss => "AwaitingToss",
            Phase::AwaitingTossChoice => "AwaitingTossChoice",
            Phase::AwaitingOpeningPlayers => "AwaitingOpeningPlayers",
            Phase::InProgress(_) => "InProgress",
            Phase::AwaitingNewBatsman(_) => "AwaitingNewBatsman",
            Phase::AwaitingNewBowler(_) => "AwaitingNewBowler",
            Phase::Completed => "Completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Phase::Completed)
    }
}

/// Aggregate root while a match is being scored.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveMatchState {
    pub match_id: MatchId,
    pub venue: String,
    pub overs_limit: u32,
    pub tournament_id: Option<String>,
    pub teams: [TeamInMatch; 2],
    /// Read-only roster snapshot taken when scoring started.
    pub rosters: [Vec<Player>; 2],
    pub scorecard: Scorecard,
    pub current_innings: InningsNo,
    pub toss_winner: Option<TeamIndex>,
    pub batting_first: Option<TeamIndex>,
    pub phase: Phase,
    /// Bowler of the over that just finished; ineligible for the next one.
    pub previous_bowler: Option<PlayerId>,
    /// Legal deliveries in the current over (0..=5 between commands).
    pub balls_in_over: u32,
    /// Completed overs in the current innings.
    pub current_over: u32,
    /// Display glyphs for this over's deliveries.
    pub over_events: Vec<String>,
    pub result: Option<String>,
    pub player_of_the_match: Option<PlayerId>,
    pub termination: Option<TerminationReason>,
}

impl LiveMatchState {
    /// Derive a fresh live state from a scheduled match and the player store's records.
    ///
    /// Team totals start from zero regardless of what the record carries.
    pub fn from_match(record: &Match, players: &[Player]) -> Result<Self, DomainError> {
        let resolve = |team: &TeamInMatch| -> Result<Vec<Player>, DomainError> {
            team.players
                .iter()
                .map(|id| {
                    players.iter().find(|p| &p.id == id).cloned().ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::Player,
                            format!("player {id} on {} not found", team.name),
                        )
                    })
                })
                .collect()
        };

        for team in &record.teams {
            if team.players.len() < 2 {
                return Err(DomainError::validation(
                    ValidationKind::InvalidMatchSetup,
                    format!("{} needs at least two players", team.name),
                ));
            }
        }

        let rosters = [resolve(&record.teams[0])?, resolve(&record.teams[1])?];
        let teams = [
            TeamInMatch::new(record.teams[0].name.clone(), record.teams[0].players.clone()),
            TeamInMatch::new(record.teams[1].name.clone(), record.teams[1].players.clone()),
        ];

        Ok(Self {
            match_id: record.id.clone(),
            venue: record.venue.clone(),
            overs_limit: record.overs,
            tournament_id: record.tournament_id.clone(),
            teams,
            rosters,
            scorecard: Scorecard::default(),
            current_innings: InningsNo::First,
            toss_winner: None,
            batting_first: None,
            phase: Phase::AwaitingToss,
            previous_bowler: None,
            balls_in_over: 0,
            current_over: 0,
            over_events: Vec::new(),
            result: None,
            player_of_the_match: None,
            termination: None,
        })
    }

    /// Batting side of the current innings, once the toss option is chosen.
    pub fn batting_team(&self) -> Option<TeamIndex> {
        let first = self.batting_first?;
        Some(match self.current_innings {
            InningsNo::First => first,
            InningsNo::Second => first.other(),
        })
    }

    pub fn bowling_team(&self) -> Option<TeamIndex> {
        self.batting_team().map(TeamIndex::other)
    }

    pub fn team(&self, index: TeamIndex) -> &TeamInMatch {
        &self.teams[index.index()]
    }

    pub fn team_mut(&mut self, index: TeamIndex) -> &mut TeamInMatch {
        &mut self.teams[index.index()]
    }

    pub fn roster(&self, index: TeamIndex) -> &[Player] {
        &self.rosters[index.index()]
    }

    pub fn find_player(&self, id: &PlayerId) -> Option<&Player> {
        self.rosters.iter().flatten().find(|p| &p.id == id)
    }

    pub fn roster_contains(&self, index: TeamIndex, id: &PlayerId) -> bool {
        self.roster(index).iter().any(|p| &p.id == id)
    }

    pub fn player_name(&self, id: &PlayerId) -> String {
        self.find_player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.clone())
    }
}

pub fn require_batting_team(
    state: &LiveMatchState,
    ctx: &'static str,
) -> Result<TeamIndex, DomainError> {
    state.batting_team().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("batting side not decided yet ({ctx})"),
        )
    })
}

pub fn require_not_completed(
    state: &LiveMatchState,
    ctx: &'static str,
) -> Result<(), DomainError> {
    if state.phase.is_completed() {
        return Err(DomainError::validation(
            ValidationKind::MatchCompleted,
            format!("match {} already completed ({ctx})", state.match_id),
        ));
    }
    Ok(())
}

pub fn phase_mismatch(state: &LiveMatchState, ctx: &'static str) -> DomainError {
    DomainError::validation(
        ValidationKind::PhaseMismatch,
        format!("{ctx} not accepted in phase {}", state.phase.name()),
    )
}

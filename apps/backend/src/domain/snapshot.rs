//! Public snapshot API for observing a live match without exposing internals.

use serde::{Deserialize, Serialize};

use crate::domain::lineup::{available_batsmen, eligible_bowlers};
use crate::domain::matches::{InningsNo, Scorecard, TeamInMatch};
use crate::domain::overs::Overs;
use crate::domain::players::Player;
use crate::domain::state::{CreaseEnd, LiveMatchState, Phase, PlayerId};

/// A player as shown to the scorer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerRef {
    fn of(state: &LiveMatchState, id: &PlayerId) -> Self {
        Self {
            id: id.clone(),
            name: state.player_name(id),
        }
    }
}

impl From<&Player> for PlayerRef {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: Overs,
    pub innings_completed: bool,
}

impl From<&TeamInMatch> for TeamSummary {
    fn from(team: &TeamInMatch) -> Self {
        Self {
            name: team.name.clone(),
            runs: team.runs,
            wickets: team.wickets,
            overs: team.overs,
            innings_completed: team.innings_completed,
        }
    }
}

/// Match-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchHeader {
    pub match_id: String,
    pub venue: String,
    pub overs_limit: u32,
    pub innings: u8,
    pub toss_winner: Option<String>,
    pub batting_team: Option<String>,
    pub teams: [TeamSummary; 2],
    pub current_over: u32,
    pub balls_in_over: u32,
    pub over_events: Vec<String>,
}

/// Top-level snapshot combining header, phase data and the scorecard so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub header: MatchHeader,
    pub phase: PhaseSnapshot,
    pub scorecard: Scorecard,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    AwaitingToss,
    AwaitingTossChoice {
        toss_winner: String,
    },
    AwaitingOpeningPlayers {
        batsmen: Vec<PlayerRef>,
        bowlers: Vec<PlayerRef>,
        /// Runs the chasing side needs; set in the second innings.
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<u32>,
    },
    InProgress(CreaseSnapshot),
    AwaitingNewBatsman {
        survivor: PlayerRef,
        vacancy: CreaseEnd,
        bowler: Option<PlayerRef>,
        available: Vec<PlayerRef>,
    },
    AwaitingNewBowler {
        striker: PlayerRef,
        non_striker: PlayerRef,
        eligible: Vec<PlayerRef>,
    },
    Completed {
        result: String,
        player_of_the_match: Option<PlayerRef>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreaseSnapshot {
    pub striker: PlayerRef,
    pub non_striker: PlayerRef,
    pub bowler: PlayerRef,
}

fn refs<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<PlayerRef> {
    players.into_iter().map(PlayerRef::from).collect()
}

/// Runs needed by the chasing side to win.
pub fn target(state: &LiveMatchState) -> Option<u32> {
    if state.current_innings != InningsNo::Second {
        return None;
    }
    let first = state.batting_first?;
    Some(state.team(first).runs + 1)
}

pub fn snapshot(state: &LiveMatchState) -> MatchSnapshot {
    let header = MatchHeader {
        match_id: state.match_id.clone(),
        venue: state.venue.clone(),
        overs_limit: state.overs_limit,
        innings: state.current_innings.number(),
        toss_winner: state.toss_winner.map(|t| state.team(t).name.clone()),
        batting_team: state.batting_team().map(|t| state.team(t).name.clone()),
        teams: [
            TeamSummary::from(&state.teams[0]),
            TeamSummary::from(&state.teams[1]),
        ],
        current_over: state.current_over,
        balls_in_over: state.balls_in_over,
        over_events: state.over_events.clone(),
    };

    let phase = match &state.phase {
        Phase::AwaitingToss => PhaseSnapshot::AwaitingToss,
        Phase::AwaitingTossChoice => PhaseSnapshot::AwaitingTossChoice {
            toss_winner: header.toss_winner.clone().unwrap_or_default(),
        },
        Phase::AwaitingOpeningPlayers => PhaseSnapshot::AwaitingOpeningPlayers {
            batsmen: refs(available_batsmen(state)),
            bowlers: refs(eligible_bowlers(state)),
            target: target(state),
        },
        Phase::InProgress(crease) => PhaseSnapshot::InProgress(CreaseSnapshot {
            striker: PlayerRef::of(state, &crease.striker),
            non_striker: PlayerRef::of(state, &crease.non_striker),
            bowler: PlayerRef::of(state, &crease.bowler),
        }),
        Phase::AwaitingNewBatsman(pause) => PhaseSnapshot::AwaitingNewBatsman {
            survivor: PlayerRef::of(state, &pause.survivor),
            vacancy: pause.vacancy,
            bowler: pause.bowler.as_ref().map(|b| PlayerRef::of(state, b)),
            available: refs(
                available_batsmen(state)
                    .into_iter()
                    .filter(|p| p.id != pause.survivor),
            ),
        },
        Phase::AwaitingNewBowler(pair) => PhaseSnapshot::AwaitingNewBowler {
            striker: PlayerRef::of(state, &pair.striker),
            non_striker: PlayerRef::of(state, &pair.non_striker),
            eligible: refs(eligible_bowlers(state)),
        },
        Phase::Completed => PhaseSnapshot::Completed {
            result: state.result.clone().unwrap_or_default(),
            player_of_the_match: state
                .player_of_the_match
                .as_ref()
                .map(|id| PlayerRef::of(state, id)),
        },
    };

    MatchSnapshot {
        header,
        phase,
        scorecard: state.scorecard.clone(),
    }
}

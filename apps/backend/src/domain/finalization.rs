//! Match results, early termination and freezing the live state into a
//! persisted record.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::matches::{InningsNo, Match, MatchStatus, Scorecard, TeamIndex};
use crate::domain::scoring::close_innings;
use crate::domain::state::{
    phase_mismatch, require_batting_team, require_not_completed, LiveMatchState, Phase, PlayerId,
};
use crate::domain::stats::{collect_stat_lines, StatLine};
use crate::errors::domain::{DomainError, ValidationKind};

/// Admin-forced reasons for ending a match without a natural result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    Forfeited,
    #[serde(rename = "Bad Weather")]
    BadWeather,
    Abandoned,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TerminationReason::Forfeited => "Forfeited",
            TerminationReason::BadWeather => "Bad Weather",
            TerminationReason::Abandoned => "Abandoned",
        })
    }
}

pub const TIED: &str = "Match Tied";

/// Result line from the two run totals.
///
/// The side batting first wins by runs, the chasing side by the wickets it
/// still had in hand.
pub fn decide_result(state: &LiveMatchState) -> String {
    let first = state.batting_first.unwrap_or(TeamIndex::First);
    let setting = state.team(first);
    let chasing = state.team(first.other());

    if setting.runs > chasing.runs {
        format!("{} won by {} runs", setting.name, setting.runs - chasing.runs)
    } else if chasing.runs > setting.runs {
        format!("{} won by {} wickets", chasing.name, chasing.wickets_in_hand())
    } else {
        TIED.to_string()
    }
}

/// Highest impact among the participants; ties go to the lowest player id.
pub fn player_of_the_match(scorecard: &Scorecard) -> Option<PlayerId> {
    let mut best: Option<(&PlayerId, f64)> = None;
    let lines = collect_stat_lines(scorecard);
    for (id, line) in &lines {
        let impact = line.impact();
        match best {
            Some((_, top)) if impact <= top => {}
            _ => best = Some((id, impact)),
        }
    }
    best.map(|(id, _)| id.clone())
}

/// Natural completion: decide the result and pick the player of the match.
pub(crate) fn conclude_natural(state: &mut LiveMatchState) {
    state.result = Some(decide_result(state));
    state.player_of_the_match = player_of_the_match(&state.scorecard);
    state.termination = None;
    state.phase = Phase::Completed;
}

/// End a chase now and compare totals as they stand.
///
/// Only accepted once the second innings is under way; the chasing side
/// has its innings closed. Ending earlier goes through `terminate_match`.
pub fn end_match(state: &mut LiveMatchState) -> Result<(), DomainError> {
    require_not_completed(state, "end_match")?;
    let chase_under_way = matches!(
        state.phase,
        Phase::InProgress(_) | Phase::AwaitingNewBatsman(_) | Phase::AwaitingNewBowler(_)
    );
    if state.current_innings != InningsNo::Second || !chase_under_way {
        return Err(phase_mismatch(state, "end_match"));
    }
    let batting = require_batting_team(state, "end_match")?;
    close_innings(state, batting);
    conclude_natural(state);
    Ok(())
}

/// Admin-forced end. The reason becomes the result and no player of the
/// match is named.
pub fn terminate_match(
    state: &mut LiveMatchState,
    reason: TerminationReason,
) -> Result<(), DomainError> {
    require_not_completed(state, "terminate_match")?;
    state.result = Some(reason.to_string());
    state.player_of_the_match = None;
    state.termination = Some(reason);
    state.balls_in_over = 0;
    state.over_events.clear();
    state.phase = Phase::Completed;
    Ok(())
}

/// Completed match ready to be committed together with the stat deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedMatch {
    pub record: Match,
    pub stat_lines: BTreeMap<PlayerId, StatLine>,
}

/// Freeze a completed live state into the persisted match shape.
pub fn finalize_match(
    state: &LiveMatchState,
    completed_at: Option<OffsetDateTime>,
) -> Result<FinalizedMatch, DomainError> {
    if !state.phase.is_completed() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!(
                "match {} cannot be finalized in phase {}",
                state.match_id,
                state.phase.name()
            ),
        ));
    }
    let result = state.result.clone().ok_or_else(|| {
        DomainError::validation_other(format!("completed match {} has no result", state.match_id))
    })?;

    let record = Match {
        id: state.match_id.clone(),
        overs: state.overs_limit,
        venue: state.venue.clone(),
        teams: state.teams.clone(),
        status: MatchStatus::Completed,
        result: Some(result),
        player_of_the_match: state.player_of_the_match.clone(),
        scorecard: Some(state.scorecard.clone()),
        tournament_id: state.tournament_id.clone(),
        completed_at,
    };

    Ok(FinalizedMatch {
        record,
        stat_lines: collect_stat_lines(&state.scorecard),
    })
}

use serde::{Deserialize, Serialize};

use crate::domain::finalization::conclude_natural;
use crate::domain::matches::{InningsNo, TeamIndex};
use crate::domain::overs::BALLS_PER_OVER;
use crate::domain::state::{
    phase_mismatch, require_batting_team, require_not_completed, Batsmen, Crease, CreaseEnd,
    LiveMatchState, Phase, WicketPause,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Runs a batsman can be credited with off one delivery.
pub const VALID_RUNS: [u32; 6] = [0, 1, 2, 3, 4, 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtraKind {
    Wide,
    NoBall,
}

impl ExtraKind {
    pub const fn glyph(self) -> &'static str {
        match self {
            ExtraKind::Wide => "Wd",
            ExtraKind::NoBall => "Nb",
        }
    }

    /// Whether the delivery counts towards the six balls of the over.
    pub const fn counts_as_ball(self) -> bool {
        matches!(self, ExtraKind::NoBall)
    }
}

/// Result of applying one delivery, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallOutcome {
    /// Display glyph appended to the over.
    pub glyph: String,
    /// The delivery was the sixth ball of the over.
    pub over_completed: bool,
    /// Innings closed by this delivery, if any.
    pub innings_ended: Option<InningsNo>,
    /// The match reached `Completed` through the second innings ending.
    pub match_completed: bool,
}

impl BallOutcome {
    fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            over_completed: false,
            innings_ended: None,
            match_completed: false,
        }
    }
}

fn require_crease(state: &LiveMatchState, ctx: &'static str) -> Result<Crease, DomainError> {
    require_not_completed(state, ctx)?;
    match &state.phase {
        Phase::InProgress(crease) => Ok(crease.clone()),
        _ => Err(phase_mismatch(state, ctx)),
    }
}

/// Apply a legal delivery off the bat.
///
/// Odd runs rotate the strike unless `declared_no_rotate` is set; the
/// over-end swap is applied on top, so an odd-run last ball leaves the
/// striker on strike for the next over.
pub fn score_run(
    state: &mut LiveMatchState,
    runs: u32,
    declared_no_rotate: bool,
) -> Result<BallOutcome, DomainError> {
    if !VALID_RUNS.contains(&runs) {
        return Err(DomainError::validation(
            ValidationKind::InvalidRuns,
            format!("{runs} is not a scoreable number of runs"),
        ));
    }
    let mut crease = require_crease(state, "score_run")?;
    let batting = require_batting_team(state, "score_run")?;

    let team = state.team_mut(batting);
    team.runs += runs;
    team.overs.add_ball();

    let innings = state.scorecard.innings_mut(state.current_innings);
    let batter = innings.batting_entry(&crease.striker);
    batter.runs += runs;
    batter.balls += 1;
    match runs {
        4 => batter.fours += 1,
        6 => batter.sixes += 1,
        _ => {}
    }
    let bowler = innings.bowling_entry(&crease.bowler);
    bowler.runs += runs;
    bowler.overs.add_ball();

    if runs % 2 == 1 && !declared_no_rotate {
        std::mem::swap(&mut crease.striker, &mut crease.non_striker);
    }

    let outcome = BallOutcome::new(runs.to_string());
    Ok(finish_legal_ball(state, batting, crease, outcome))
}

/// Dismiss the striker off a legal delivery.
pub fn score_wicket(state: &mut LiveMatchState) -> Result<BallOutcome, DomainError> {
    let crease = require_crease(state, "score_wicket")?;
    let batting = require_batting_team(state, "score_wicket")?;

    let team = state.team_mut(batting);
    team.wickets += 1;
    team.overs.add_ball();

    let innings = state.scorecard.innings_mut(state.current_innings);
    let batter = innings.batting_entry(&crease.striker);
    batter.balls += 1;
    batter.out = true;
    let bowler = innings.bowling_entry(&crease.bowler);
    bowler.wickets += 1;
    bowler.overs.add_ball();

    let mut outcome = BallOutcome::new("W");
    state.over_events.push(outcome.glyph.clone());
    state.balls_in_over += 1;

    if state.balls_in_over >= BALLS_PER_OVER {
        close_over(state, batting, &crease);
        outcome.over_completed = true;
        // The over-end swap carries the vacancy to the far end.
        state.phase = Phase::AwaitingNewBatsman(WicketPause {
            survivor: crease.non_striker,
            vacancy: CreaseEnd::NonStriker,
            bowler: None,
        });
    } else {
        state.phase = Phase::AwaitingNewBatsman(WicketPause {
            survivor: crease.non_striker,
            vacancy: CreaseEnd::Striker,
            bowler: Some(crease.bowler),
        });
    }

    check_innings_end(state, batting, &mut outcome);
    Ok(outcome)
}

/// Award a one-run extra. Extras never rotate the strike.
pub fn score_extra(state: &mut LiveMatchState, kind: ExtraKind) -> Result<BallOutcome, DomainError> {
    let crease = require_crease(state, "score_extra")?;
    let batting = require_batting_team(state, "score_extra")?;

    let team = state.team_mut(batting);
    team.runs += 1;
    if kind.counts_as_ball() {
        team.overs.add_ball();
    }

    let innings = state.scorecard.innings_mut(state.current_innings);
    innings.extras += 1;
    let bowler = innings.bowling_entry(&crease.bowler);
    bowler.runs += 1;
    if kind.counts_as_ball() {
        bowler.overs.add_ball();
        innings.batting_entry(&crease.striker).balls += 1;
    }

    let outcome = BallOutcome::new(kind.glyph());
    if kind.counts_as_ball() {
        return Ok(finish_legal_ball(state, batting, crease, outcome));
    }
    state.over_events.push(outcome.glyph.clone());
    state.phase = Phase::InProgress(crease);
    Ok(outcome)
}

/// Shared tail of every ball that counts towards the over.
fn finish_legal_ball(
    state: &mut LiveMatchState,
    batting: TeamIndex,
    crease: Crease,
    mut outcome: BallOutcome,
) -> BallOutcome {
    state.over_events.push(outcome.glyph.clone());
    state.balls_in_over += 1;

    if state.balls_in_over >= BALLS_PER_OVER {
        close_over(state, batting, &crease);
        outcome.over_completed = true;
        state.phase = Phase::AwaitingNewBowler(Batsmen {
            striker: crease.non_striker,
            non_striker: crease.striker,
        });
    } else {
        state.phase = Phase::InProgress(crease);
    }

    check_innings_end(state, batting, &mut outcome);
    outcome
}

/// Over bookkeeping. The caller installs the swapped pair in the next phase.
fn close_over(state: &mut LiveMatchState, batting: TeamIndex, crease: &Crease) {
    state.current_over += 1;
    state.balls_in_over = 0;
    state.over_events.clear();
    state.team_mut(batting).overs.complete_over();
    state
        .scorecard
        .innings_mut(state.current_innings)
        .bowling_entry(&crease.bowler)
        .overs
        .complete_over();
    state.previous_bowler = Some(crease.bowler.clone());
}

/// Whether the batting side is all out or has used its overs.
pub fn innings_over(state: &LiveMatchState, batting: TeamIndex) -> bool {
    let team = state.team(batting);
    team.wickets >= team.all_out_at() || team.overs.completed() >= state.overs_limit
}

fn check_innings_end(state: &mut LiveMatchState, batting: TeamIndex, outcome: &mut BallOutcome) {
    if !innings_over(state, batting) {
        return;
    }
    let finished = state.current_innings;
    close_innings(state, batting);
    outcome.innings_ended = Some(finished);

    match finished {
        InningsNo::First => {
            state.current_innings = InningsNo::Second;
            state.phase = Phase::AwaitingOpeningPlayers;
        }
        InningsNo::Second => {
            conclude_natural(state);
            outcome.match_completed = true;
        }
    }
}

/// Mark the batting side done and clear the per-innings counters.
pub(crate) fn close_innings(state: &mut LiveMatchState, batting: TeamIndex) {
    state.team_mut(batting).innings_completed = true;
    state.balls_in_over = 0;
    state.current_over = 0;
    state.over_events.clear();
    state.previous_bowler = None;
}

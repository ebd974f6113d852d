//! Player installation at the crease and bowler selection.

use crate::domain::matches::TeamIndex;
use crate::domain::players::Player;
use crate::domain::state::{
    phase_mismatch, require_batting_team, require_not_completed, Batsmen, Crease, CreaseEnd,
    LiveMatchState, Phase, PlayerId,
};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Batting-side players not yet dismissed in the current innings.
pub fn available_batsmen(state: &LiveMatchState) -> Vec<&Player> {
    let Some(batting) = state.batting_team() else {
        return Vec::new();
    };
    let innings = state.scorecard.innings(state.current_innings);
    state
        .roster(batting)
        .iter()
        .filter(|p| !innings.is_out(&p.id))
        .collect()
}

/// Bowling-side players allowed to bowl the next over.
pub fn eligible_bowlers(state: &LiveMatchState) -> Vec<&Player> {
    let Some(bowling) = state.bowling_team() else {
        return Vec::new();
    };
    state
        .roster(bowling)
        .iter()
        .filter(|p| state.previous_bowler.as_ref() != Some(&p.id))
        .collect()
}

fn check_roster(
    state: &LiveMatchState,
    team: TeamIndex,
    id: &PlayerId,
    slot: &str,
) -> Result<(), DomainError> {
    if state.find_player(id).is_none() {
        return Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("{slot} {id} is not part of this match"),
        ));
    }
    if !state.roster_contains(team, id) {
        return Err(DomainError::validation(
            ValidationKind::PlayerNotInRoster,
            format!("{slot} {id} does not play for {}", state.team(team).name),
        ));
    }
    Ok(())
}

fn check_batsman(state: &LiveMatchState, team: TeamIndex, id: &PlayerId) -> Result<(), DomainError> {
    check_roster(state, team, id, "batsman")?;
    if state.scorecard.innings(state.current_innings).is_out(id) {
        return Err(DomainError::validation(
            ValidationKind::BatsmanAlreadyOut,
            format!("batsman {id} is already out this innings"),
        ));
    }
    Ok(())
}

fn check_bowler(
    state: &LiveMatchState,
    team: TeamIndex,
    id: &PlayerId,
    after_over_break: bool,
) -> Result<(), DomainError> {
    check_roster(state, team, id, "bowler")?;
    if after_over_break && state.previous_bowler.as_ref() == Some(id) {
        return Err(DomainError::validation(
            ValidationKind::BowlerRepeated,
            format!("bowler {id} bowled the previous over"),
        ));
    }
    Ok(())
}

fn check_distinct(striker: &PlayerId, non_striker: &PlayerId) -> Result<(), DomainError> {
    if striker == non_striker {
        return Err(DomainError::validation(
            ValidationKind::SamePlayer,
            format!("{striker} cannot bat at both ends"),
        ));
    }
    Ok(())
}

fn retained_changed(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::RetainedPlayerChanged, detail)
}

/// Install striker, non-striker and bowler, unblocking scoring.
///
/// Accepted when opening an innings and as the full-slot form of the wicket
/// and over-break pauses; in the pauses the players who stay on must be
/// passed unchanged.
pub fn set_live_players(
    state: &mut LiveMatchState,
    striker: &PlayerId,
    non_striker: &PlayerId,
    bowler: &PlayerId,
) -> Result<(), DomainError> {
    require_not_completed(state, "set_live_players")?;
    let batting = require_batting_team(state, "set_live_players")?;
    let bowling = batting.other();

    check_distinct(striker, non_striker)?;
    check_batsman(state, batting, striker)?;
    check_batsman(state, batting, non_striker)?;

    match &state.phase {
        Phase::AwaitingOpeningPlayers => {
            check_bowler(state, bowling, bowler, false)?;
        }
        Phase::AwaitingNewBatsman(pause) => {
            let retained = match pause.vacancy {
                CreaseEnd::Striker => non_striker,
                CreaseEnd::NonStriker => striker,
            };
            if retained != &pause.survivor {
                return Err(retained_changed(format!(
                    "{} must stay at the crease",
                    pause.survivor
                )));
            }
            match &pause.bowler {
                Some(current) if current != bowler => {
                    return Err(retained_changed(format!(
                        "{current} is bowling the current over"
                    )));
                }
                Some(_) => {}
                None => check_bowler(state, bowling, bowler, true)?,
            }
        }
        Phase::AwaitingNewBowler(pair) => {
            if &pair.striker != striker || &pair.non_striker != non_striker {
                return Err(retained_changed("batsmen cannot change at an over break"));
            }
            check_bowler(state, bowling, bowler, true)?;
        }
        _ => return Err(phase_mismatch(state, "set_live_players")),
    }

    state.phase = Phase::InProgress(Crease {
        striker: striker.clone(),
        non_striker: non_striker.clone(),
        bowler: bowler.clone(),
    });
    Ok(())
}

/// Fill the batting vacancy left by a wicket.
pub fn select_new_batsman(state: &mut LiveMatchState, incoming: &PlayerId) -> Result<(), DomainError> {
    require_not_completed(state, "select_new_batsman")?;
    let Phase::AwaitingNewBatsman(pause) = &state.phase else {
        return Err(phase_mismatch(state, "select_new_batsman"));
    };
    let batting = require_batting_team(state, "select_new_batsman")?;

    check_distinct(incoming, &pause.survivor)?;
    check_batsman(state, batting, incoming)?;

    let (striker, non_striker) = pause.fill(incoming.clone());
    state.phase = match pause.bowler.clone() {
        Some(bowler) => Phase::InProgress(Crease {
            striker,
            non_striker,
            bowler,
        }),
        None => Phase::AwaitingNewBowler(Batsmen {
            striker,
            non_striker,
        }),
    };
    Ok(())
}

/// Choose the bowler for the next over.
pub fn select_new_bowler(state: &mut LiveMatchState, bowler: &PlayerId) -> Result<(), DomainError> {
    require_not_completed(state, "select_new_bowler")?;
    let Phase::AwaitingNewBowler(pair) = &state.phase else {
        return Err(phase_mismatch(state, "select_new_bowler"));
    };
    let bowling = require_batting_team(state, "select_new_bowler")?.other();
    check_bowler(state, bowling, bowler, true)?;

    state.phase = Phase::InProgress(Crease {
        striker: pair.striker.clone(),
        non_striker: pair.non_striker.clone(),
        bowler: bowler.clone(),
    });
    Ok(())
}

//! Toss and bat/bowl choice.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::matches::{InningsNo, TeamIndex};
use crate::domain::state::{phase_mismatch, require_not_completed, LiveMatchState, Phase};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TossChoice {
    Bat,
    Bowl,
}

/// Pick the toss winner uniformly and record it.
pub fn perform_toss<R: Rng + ?Sized>(
    state: &mut LiveMatchState,
    rng: &mut R,
) -> Result<TeamIndex, DomainError> {
    require_not_completed(state, "perform_toss")?;
    if state.toss_winner.is_some() {
        return Err(DomainError::validation(
            ValidationKind::TossAlreadyPerformed,
            "Toss already performed",
        ));
    }
    if state.phase != Phase::AwaitingToss {
        return Err(phase_mismatch(state, "perform_toss"));
    }

    let winner = if rng.random_bool(0.5) {
        TeamIndex::First
    } else {
        TeamIndex::Second
    };
    state.toss_winner = Some(winner);
    state.phase = Phase::AwaitingTossChoice;
    Ok(winner)
}

/// Decide who bats first and name both innings on the scorecard.
///
/// Returns the side batting first. Players are installed separately.
pub fn select_toss_option(
    state: &mut LiveMatchState,
    choice: TossChoice,
) -> Result<TeamIndex, DomainError> {
    require_not_completed(state, "select_toss_option")?;
    let Some(winner) = state.toss_winner else {
        return Err(DomainError::validation(
            ValidationKind::TossNotPerformed,
            "Toss not performed",
        ));
    };
    if state.phase != Phase::AwaitingTossChoice {
        return Err(phase_mismatch(state, "select_toss_option"));
    }

    let batting_first = match choice {
        TossChoice::Bat => winner,
        TossChoice::Bowl => winner.other(),
    };
    state.batting_first = Some(batting_first);
    state.scorecard.innings_mut(InningsNo::First).team =
        Some(state.team(batting_first).name.clone());
    state.scorecard.innings_mut(InningsNo::Second).team =
        Some(state.team(batting_first.other()).name.clone());
    state.phase = Phase::AwaitingOpeningPlayers;
    Ok(batting_first)
}

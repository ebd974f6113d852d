//! Live scoring session for one match.
//!
//! Every command runs against a working copy of the state and is published
//! only when it succeeds, so a rejected command leaves no trace.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::domain::finalization::{end_match, finalize_match, terminate_match, TerminationReason};
use crate::domain::lineup::{select_new_batsman, select_new_bowler, set_live_players};
use crate::domain::scoring::{score_extra, score_run, score_wicket, BallOutcome, ExtraKind};
use crate::domain::snapshot::{snapshot, MatchSnapshot};
use crate::domain::toss::{perform_toss, select_toss_option, TossChoice};
use crate::domain::transitions::{derive_transitions, MatchLifecycleView, MatchTransition};
use crate::domain::{FinalizedMatch, LiveMatchState, PlayerId};
use crate::errors::domain::DomainError;

/// Scorer input, as issued by the presentation layer or a session script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoringCommand {
    PerformToss,
    SelectTossOption {
        choice: TossChoice,
    },
    SetLivePlayers {
        striker: PlayerId,
        non_striker: PlayerId,
        bowler: PlayerId,
    },
    SelectNewBatsman {
        player: PlayerId,
    },
    SelectNewBowler {
        player: PlayerId,
    },
    ScoreRun {
        runs: u32,
        #[serde(default)]
        declared_no_rotate: bool,
    },
    ScoreWicket,
    ScoreExtra {
        kind: ExtraKind,
    },
    /// Close the match now and compare totals as they stand.
    EndMatch,
    Terminate {
        reason: TerminationReason,
    },
}

impl ScoringCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ScoringCommand::PerformToss => "perform_toss",
            ScoringCommand::SelectTossOption { .. } => "select_toss_option",
            ScoringCommand::SetLivePlayers { .. } => "set_live_players",
            ScoringCommand::SelectNewBatsman { .. } => "select_new_batsman",
            ScoringCommand::SelectNewBowler { .. } => "select_new_bowler",
            ScoringCommand::ScoreRun { .. } => "score_run",
            ScoringCommand::ScoreWicket => "score_wicket",
            ScoringCommand::ScoreExtra { .. } => "score_extra",
            ScoringCommand::EndMatch => "end_match",
            ScoringCommand::Terminate { .. } => "terminate",
        }
    }
}

/// Result of an accepted command, describing what state changes occurred.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub snapshot: MatchSnapshot,
    pub transitions: Vec<MatchTransition>,
    /// Set for deliveries.
    pub ball: Option<BallOutcome>,
}

#[derive(Debug)]
pub struct ScoringEngine {
    state: LiveMatchState,
    rng: ChaCha8Rng,
    /// Completed match waiting for a successful commit.
    pending: Option<FinalizedMatch>,
}

impl ScoringEngine {
    /// Open a session on a fresh live state. `toss_seed` makes the toss
    /// reproducible; without it the RNG is seeded from the OS.
    pub fn open(state: LiveMatchState, toss_seed: Option<u64>) -> Self {
        let rng = match toss_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        info!(match_id = %state.match_id, seeded = toss_seed.is_some(), "Scoring session opened");
        Self {
            state,
            rng,
            pending: None,
        }
    }

    pub fn state(&self) -> &LiveMatchState {
        &self.state
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        snapshot(&self.state)
    }

    pub fn is_completed(&self) -> bool {
        self.state.phase.is_completed()
    }

    pub fn command(&mut self, command: ScoringCommand) -> Result<CommandResult, DomainError> {
        let name = command.name();
        let mut next = self.state.clone();
        let mut rng = self.rng.clone();

        let ball = match apply(&mut next, &mut rng, command) {
            Ok(ball) => ball,
            Err(err) => {
                warn!(
                    match_id = %self.state.match_id,
                    command = name,
                    phase = self.state.phase.name(),
                    error = %err,
                    "Scoring command rejected"
                );
                return Err(err);
            }
        };

        if next.phase.is_completed() && !self.state.phase.is_completed() {
            self.pending = Some(finalize_match(&next, Some(OffsetDateTime::now_utc()))?);
        }

        let transitions = derive_transitions(
            &MatchLifecycleView::of(&self.state),
            &MatchLifecycleView::of(&next),
        );
        self.state = next;
        self.rng = rng;

        debug!(
            match_id = %self.state.match_id,
            command = name,
            innings = self.state.current_innings.number(),
            over = self.state.current_over,
            ball = self.state.balls_in_over,
            phase = self.state.phase.name(),
            "Scoring command applied"
        );
        for transition in &transitions {
            info!(match_id = %self.state.match_id, ?transition, "Match transition");
        }

        Ok(CommandResult {
            snapshot: snapshot(&self.state),
            transitions,
            ball,
        })
    }

    /// The finalized match still to be committed, if any.
    pub fn pending_finalization(&self) -> Option<&FinalizedMatch> {
        self.pending.as_ref()
    }

    /// Drop the pending finalization once the store has accepted it.
    pub fn mark_persisted(&mut self) -> Option<FinalizedMatch> {
        let done = self.pending.take();
        if done.is_some() {
            info!(match_id = %self.state.match_id, "Finalized match persisted");
        }
        done
    }
}

fn apply(
    state: &mut LiveMatchState,
    rng: &mut ChaCha8Rng,
    command: ScoringCommand,
) -> Result<Option<BallOutcome>, DomainError> {
    match command {
        ScoringCommand::PerformToss => {
            perform_toss(state, rng)?;
        }
        ScoringCommand::SelectTossOption { choice } => {
            select_toss_option(state, choice)?;
        }
        ScoringCommand::SetLivePlayers {
            striker,
            non_striker,
            bowler,
        } => set_live_players(state, &striker, &non_striker, &bowler)?,
        ScoringCommand::SelectNewBatsman { player } => select_new_batsman(state, &player)?,
        ScoringCommand::SelectNewBowler { player } => select_new_bowler(state, &player)?,
        ScoringCommand::ScoreRun {
            runs,
            declared_no_rotate,
        } => return score_run(state, runs, declared_no_rotate).map(Some),
        ScoringCommand::ScoreWicket => return score_wicket(state).map(Some),
        ScoringCommand::ScoreExtra { kind } => return score_extra(state, kind).map(Some),
        ScoringCommand::EndMatch => end_match(state)?,
        ScoringCommand::Terminate { reason } => terminate_match(state, reason)?,
    }
    Ok(None)
}

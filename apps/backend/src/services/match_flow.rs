//! Orchestrates one live scoring session against the repositories.
//!
//! The engine itself is synchronous; this service loads the match, feeds it
//! commands and commits the finalized result with bounded retries.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::ScoringConfig;
use crate::domain::{
    FinalizedMatch, LiveMatchState, MatchId, MatchSnapshot, MatchStatus, Player, PlayerId,
};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::{FinalizationRepo, MatchRepo, PlayerRepo};
use crate::services::scoring_engine::{CommandResult, ScoringCommand, ScoringEngine};

/// Outcome of a successful commit.
#[derive(Debug, Clone)]
pub struct PersistedMatch {
    pub finalized: FinalizedMatch,
    pub players: Vec<Player>,
    /// 0-based attempt that succeeded.
    pub attempt: u32,
}

/// The single session slot.
///
/// `Reserved` holds the slot while the store is touched without the lock,
/// so a second start cannot mark another match live in between.
enum Slot {
    Idle,
    Reserved(MatchId),
    Active(ScoringEngine),
}

pub struct MatchFlowService {
    matches: Arc<dyn MatchRepo>,
    players: Arc<dyn PlayerRepo>,
    finalization: Arc<dyn FinalizationRepo>,
    config: ScoringConfig,
    session: Mutex<Slot>,
}

impl MatchFlowService {
    pub fn new(
        matches: Arc<dyn MatchRepo>,
        players: Arc<dyn PlayerRepo>,
        finalization: Arc<dyn FinalizationRepo>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            matches,
            players,
            finalization,
            config,
            session: Mutex::new(Slot::Idle),
        }
    }

    /// Wire every repository to the same store.
    pub fn from_store<S>(store: S, config: ScoringConfig) -> Self
    where
        S: MatchRepo + PlayerRepo + FinalizationRepo + Clone + 'static,
    {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            config,
        )
    }

    /// Open a session on a scheduled match and mark it live.
    ///
    /// The slot is reserved first and released again if anything fails.
    pub async fn start_scoring(&self, match_id: &MatchId) -> Result<MatchSnapshot, AppError> {
        self.reserve(match_id)?;
        match self.open_engine(match_id).await {
            Ok(engine) => {
                let snapshot = engine.snapshot();
                *self.session.lock() = Slot::Active(engine);
                info!(match_id = %match_id, "Scoring started");
                Ok(snapshot)
            }
            Err(e) => {
                *self.session.lock() = Slot::Idle;
                debug!(match_id = %match_id, error = ?e, "Scoring start failed");
                Err(e)
            }
        }
    }

    fn reserve(&self, match_id: &MatchId) -> Result<(), AppError> {
        let mut slot = self.session.lock();
        match &*slot {
            Slot::Idle => {
                *slot = Slot::Reserved(match_id.clone());
                Ok(())
            }
            Slot::Reserved(held) => Err(session_active(held)),
            Slot::Active(engine) => Err(session_active(&engine.state().match_id)),
        }
    }

    async fn open_engine(&self, match_id: &MatchId) -> Result<ScoringEngine, AppError> {
        let record = self.matches.require_match(match_id).await?;
        if record.status != MatchStatus::Scheduled {
            return Err(DomainError::conflict(
                ConflictKind::MatchNotScheduled,
                format!("Match {match_id} is {:?}, not scheduled", record.status),
            )
            .into());
        }

        let mut roster = self.players.players_by_ids(&record.teams[0].players).await?;
        roster.extend(self.players.players_by_ids(&record.teams[1].players).await?);
        let state = LiveMatchState::from_match(&record, &roster)?;
        self.matches.mark_live(match_id).await?;
        Ok(ScoringEngine::open(state, self.config.toss_seed))
    }

    pub fn apply(&self, command: ScoringCommand) -> Result<CommandResult, AppError> {
        match &mut *self.session.lock() {
            Slot::Active(engine) => Ok(engine.command(command)?),
            _ => Err(no_session()),
        }
    }

    pub fn snapshot(&self) -> Result<MatchSnapshot, AppError> {
        match &*self.session.lock() {
            Slot::Active(engine) => Ok(engine.snapshot()),
            _ => Err(no_session()),
        }
    }

    /// Commit the completed match and fold its stat lines into career stats.
    ///
    /// Retryable store failures are retried up to `commit_attempts` times.
    /// If every attempt fails the finalization stays pending and this may be
    /// called again; the session closes only after a successful commit.
    /// A commit whose acknowledgement was lost is recognised on retry by the
    /// stored record matching the pending one.
    pub async fn finalize_and_persist(&self) -> Result<PersistedMatch, AppError> {
        let pending = {
            let slot = self.session.lock();
            let Slot::Active(engine) = &*slot else {
                return Err(no_session());
            };
            engine.pending_finalization().cloned().ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!(
                        "Match {} has no completed result to persist",
                        engine.state().match_id
                    ),
                )
            })?
        };
        let match_id = pending.record.id.clone();

        let mut last_error = None;
        for attempt in 0..self.config.commit_attempts {
            match self.finalization.commit_finalization(&pending).await {
                Ok(players) => {
                    info!(
                        match_id = %match_id,
                        attempt,
                        players = players.len(),
                        result = ?pending.record.result,
                        "Match finalized"
                    );
                    return Ok(self.close_committed(pending, players, attempt));
                }
                Err(DomainError::Conflict(ConflictKind::MatchAlreadyCompleted, detail)) => {
                    let stored = self.matches.require_match(&match_id).await?;
                    if stored != pending.record {
                        warn!(match_id = %match_id, attempt, "Stored result differs from pending");
                        return Err(DomainError::conflict(
                            ConflictKind::MatchAlreadyCompleted,
                            detail,
                        )
                        .into());
                    }
                    let ids: Vec<PlayerId> = pending.stat_lines.keys().cloned().collect();
                    let players = self.players.players_by_ids(&ids).await?;
                    info!(match_id = %match_id, attempt, "Finalization already committed");
                    return Ok(self.close_committed(pending, players, attempt));
                }
                Err(e) => {
                    let err = AppError::from(e);
                    if !err.is_retryable() {
                        warn!(match_id = %match_id, attempt, error = ?err, "Finalization rejected");
                        return Err(err);
                    }
                    warn!(match_id = %match_id, attempt, error = ?err, "Finalization commit failed");
                    last_error = Some(err);
                }
            }
        }

        debug!(match_id = %match_id, "Finalization left pending");
        Err(last_error.unwrap_or_else(|| AppError::internal("Finalization was never attempted")))
    }

    fn close_committed(
        &self,
        finalized: FinalizedMatch,
        players: Vec<Player>,
        attempt: u32,
    ) -> PersistedMatch {
        let mut slot = self.session.lock();
        if let Slot::Active(engine) = &mut *slot {
            engine.mark_persisted();
        }
        *slot = Slot::Idle;
        PersistedMatch {
            finalized,
            players,
            attempt,
        }
    }

    /// Drop the active session and return its match to scheduled.
    ///
    /// Refused while a completed result is waiting to be persisted.
    pub async fn abandon_session(&self) -> Result<MatchId, AppError> {
        let engine = {
            let mut slot = self.session.lock();
            match std::mem::replace(&mut *slot, Slot::Idle) {
                Slot::Active(engine) => {
                    let match_id = engine.state().match_id.clone();
                    if engine.pending_finalization().is_some() {
                        *slot = Slot::Active(engine);
                        return Err(DomainError::conflict(
                            ConflictKind::FinalizationPending,
                            format!("Match {match_id} has a result waiting to be persisted"),
                        )
                        .into());
                    }
                    *slot = Slot::Reserved(match_id);
                    engine
                }
                other => {
                    *slot = other;
                    return Err(no_session());
                }
            }
        };

        let match_id = engine.state().match_id.clone();
        match self.matches.revert_to_scheduled(&match_id).await {
            Ok(_) => {
                *self.session.lock() = Slot::Idle;
                warn!(match_id = %match_id, "Scoring session abandoned");
                Ok(match_id)
            }
            Err(e) => {
                *self.session.lock() = Slot::Active(engine);
                Err(e.into())
            }
        }
    }
}

fn session_active(match_id: &MatchId) -> AppError {
    DomainError::conflict(
        ConflictKind::SessionActive,
        format!("Match {match_id} is already being scored"),
    )
    .into()
}

fn no_session() -> AppError {
    DomainError::not_found(NotFoundKind::Session, "No scoring session is open").into()
}

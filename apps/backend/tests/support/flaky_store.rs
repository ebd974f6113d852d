//! Store wrappers that fail or stall on demand.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use backend::domain::{FinalizedMatch, Match, MatchId, Player};
use backend::errors::domain::{DomainError, InfraErrorKind};
use backend::repos::{FinalizationRepo, MatchRepo};
use backend::InMemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Reject before writing anything.
    Unavailable,
    /// Write the batch, then report a timeout.
    LostAck,
}

pub struct FlakyFinalization {
    inner: InMemoryStore,
    failure: Failure,
    remaining: AtomicU32,
    calls: AtomicU32,
}

impl FlakyFinalization {
    pub fn new(inner: InMemoryStore, failure: Failure, failures: u32) -> Self {
        Self {
            inner,
            failure,
            remaining: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl FinalizationRepo for FlakyFinalization {
    async fn commit_finalization(
        &self,
        finalized: &FinalizedMatch,
    ) -> Result<Vec<Player>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.take_failure() {
            return self.inner.commit_finalization(finalized).await;
        }
        match self.failure {
            Failure::Unavailable => Err(DomainError::infra(
                InfraErrorKind::StoreUnavailable,
                "store offline",
            )),
            Failure::LostAck => {
                self.inner.commit_finalization(finalized).await?;
                Err(DomainError::infra(InfraErrorKind::Timeout, "ack lost"))
            }
        }
    }
}

/// Match repository that yields to the scheduler before every read, so
/// concurrent callers interleave at each lookup.
#[derive(Clone)]
pub struct YieldingMatches(pub InMemoryStore);

#[async_trait]
impl MatchRepo for YieldingMatches {
    async fn insert_match(&self, record: Match) -> Result<Match, DomainError> {
        self.0.insert_match(record).await
    }

    async fn find_match(&self, id: &MatchId) -> Result<Option<Match>, DomainError> {
        tokio::task::yield_now().await;
        self.0.find_match(id).await
    }

    async fn list_matches(&self) -> Result<Vec<Match>, DomainError> {
        self.0.list_matches().await
    }

    async fn mark_live(&self, id: &MatchId) -> Result<Match, DomainError> {
        tokio::task::yield_now().await;
        self.0.mark_live(id).await
    }

    async fn revert_to_scheduled(&self, id: &MatchId) -> Result<Match, DomainError> {
        self.0.revert_to_scheduled(id).await
    }
}

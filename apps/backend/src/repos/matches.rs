use async_trait::async_trait;

use crate::domain::{Match, MatchId};
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait MatchRepo: Send + Sync {
    async fn insert_match(&self, record: Match) -> Result<Match, DomainError>;

    async fn find_match(&self, id: &MatchId) -> Result<Option<Match>, DomainError>;

    async fn list_matches(&self) -> Result<Vec<Match>, DomainError>;

    /// Move a `scheduled` match to `live`. Any other status is a
    /// `Conflict(MatchNotScheduled)`.
    async fn mark_live(&self, id: &MatchId) -> Result<Match, DomainError>;

    /// Return a `live` match to `scheduled` when its session is dropped
    /// before completion. Any other status is a `Conflict(MatchNotScheduled)`
    /// naming the actual status.
    async fn revert_to_scheduled(&self, id: &MatchId) -> Result<Match, DomainError>;

    async fn require_match(&self, id: &MatchId) -> Result<Match, DomainError> {
        self.find_match(id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {id} not found"))
        })
    }
}

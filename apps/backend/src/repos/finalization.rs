use async_trait::async_trait;

use crate::domain::{FinalizedMatch, Player};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait FinalizationRepo: Send + Sync {
    /// Write the completed match and fold every stat line into the
    /// participants' career stats as one batch.
    ///
    /// Either everything is applied or nothing is. A match already stored
    /// as completed is rejected with `Conflict(MatchAlreadyCompleted)` and
    /// no stats change. Returns the updated players.
    async fn commit_finalization(
        &self,
        finalized: &FinalizedMatch,
    ) -> Result<Vec<Player>, DomainError>;
}

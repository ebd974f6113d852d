use async_trait::async_trait;

use crate::domain::{Player, PlayerId};
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait PlayerRepo: Send + Sync {
    /// Store a new player. Fails with `Conflict(DuplicatePlayerName)` when
    /// the normalized name is taken.
    async fn insert_player(&self, player: Player) -> Result<Player, DomainError>;

    async fn find_player(&self, id: &PlayerId) -> Result<Option<Player>, DomainError>;

    async fn list_players(&self) -> Result<Vec<Player>, DomainError>;

    /// Resolve every id, in order; any missing id is a `NotFound`.
    async fn players_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, DomainError> {
        let mut players = Vec::with_capacity(ids.len());
        for id in ids {
            let player = self.find_player(id).await?.ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("Player {id} not found"))
            })?;
            players.push(player);
        }
        Ok(players)
    }
}

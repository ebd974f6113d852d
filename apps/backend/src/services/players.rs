//! Player domain service.

use serde::{Deserialize, Serialize};
use tracing::info;
use ulid::Ulid;

use crate::domain::players::name_key;
use crate::domain::rankings::{calculate_rankings, Rankings};
use crate::domain::{Player, PlayerId, PlayerRole};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::PlayerRepo;

/// Registration request. `id` is generated when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    #[serde(default)]
    pub id: Option<PlayerId>,
    pub name: String,
    pub role: PlayerRole,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            id: None,
            name: name.into(),
            role,
        }
    }
}

/// Player domain service.
pub struct PlayerService<R: PlayerRepo> {
    repo: R,
}

impl<R: PlayerRepo> PlayerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a player with zeroed career stats.
    ///
    /// The name is stored trimmed; uniqueness is checked on its normalized
    /// form.
    pub async fn register_player(&self, new: NewPlayer) -> Result<Player, AppError> {
        let name = new.name.trim();
        if name_key(name).is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayer,
                "Player name must not be blank",
            )
            .into());
        }

        let id = new.id.unwrap_or_else(|| Ulid::new().to_string());
        let player = self
            .repo
            .insert_player(Player::new(id, name, new.role))
            .await?;
        info!(player_id = %player.id, role = ?player.role, "Player registered");
        Ok(player)
    }

    pub async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        Ok(self.repo.list_players().await?)
    }

    pub async fn rankings(&self) -> Result<Rankings, AppError> {
        let players = self.repo.list_players().await?;
        Ok(calculate_rankings(&players))
    }
}

//! In-process store implementing every repository trait.
//!
//! One `RwLock` guards all tables, so a finalization batch is validated and
//! applied under a single write guard and is never observed half done.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::players::name_key;
use crate::domain::{FinalizedMatch, Match, MatchId, MatchStatus, Player, PlayerId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{FinalizationRepo, MatchRepo, PlayerRepo};

#[derive(Debug, Default)]
struct Tables {
    players: BTreeMap<PlayerId, Player>,
    /// Normalized name -> player id.
    names: HashMap<String, PlayerId>,
    matches: BTreeMap<MatchId, Match>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepo for InMemoryStore {
    async fn insert_player(&self, player: Player) -> Result<Player, DomainError> {
        let mut tables = self.tables.write();
        let key = name_key(&player.name);
        if tables.names.contains_key(&key) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicatePlayerName,
                format!("A player named {} already exists", player.name.trim()),
            ));
        }
        if tables.players.contains_key(&player.id) {
            return Err(DomainError::conflict(
                ConflictKind::Other("DuplicatePlayerId".into()),
                format!("Player id {} already exists", player.id),
            ));
        }
        tables.names.insert(key, player.id.clone());
        tables.players.insert(player.id.clone(), player.clone());
        Ok(player)
    }

    async fn find_player(&self, id: &PlayerId) -> Result<Option<Player>, DomainError> {
        Ok(self.tables.read().players.get(id).cloned())
    }

    async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        Ok(self.tables.read().players.values().cloned().collect())
    }
}

#[async_trait]
impl MatchRepo for InMemoryStore {
    async fn insert_match(&self, record: Match) -> Result<Match, DomainError> {
        let mut tables = self.tables.write();
        if tables.matches.contains_key(&record.id) {
            return Err(DomainError::conflict(
                ConflictKind::Other("DuplicateMatchId".into()),
                format!("Match id {} already exists", record.id),
            ));
        }
        tables.matches.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find_match(&self, id: &MatchId) -> Result<Option<Match>, DomainError> {
        Ok(self.tables.read().matches.get(id).cloned())
    }

    async fn list_matches(&self) -> Result<Vec<Match>, DomainError> {
        Ok(self.tables.read().matches.values().cloned().collect())
    }

    async fn mark_live(&self, id: &MatchId) -> Result<Match, DomainError> {
        let mut tables = self.tables.write();
        let record = tables.matches.get_mut(id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {id} not found"))
        })?;
        if record.status != MatchStatus::Scheduled {
            return Err(DomainError::conflict(
                ConflictKind::MatchNotScheduled,
                format!("Match {id} is {:?}, not scheduled", record.status),
            ));
        }
        record.status = MatchStatus::Live;
        Ok(record.clone())
    }

    async fn revert_to_scheduled(&self, id: &MatchId) -> Result<Match, DomainError> {
        let mut tables = self.tables.write();
        let record = tables.matches.get_mut(id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {id} not found"))
        })?;
        if record.status != MatchStatus::Live {
            return Err(DomainError::conflict(
                ConflictKind::MatchNotScheduled,
                format!("Match {id} is {:?}, not live", record.status),
            ));
        }
        record.status = MatchStatus::Scheduled;
        Ok(record.clone())
    }
}

#[async_trait]
impl FinalizationRepo for InMemoryStore {
    async fn commit_finalization(
        &self,
        finalized: &FinalizedMatch,
    ) -> Result<Vec<Player>, DomainError> {
        let match_id = &finalized.record.id;
        let mut tables = self.tables.write();

        // Validate everything before touching anything.
        let stored = tables.matches.get(match_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
        })?;
        if stored.status == MatchStatus::Completed {
            return Err(DomainError::conflict(
                ConflictKind::MatchAlreadyCompleted,
                format!("Match {match_id} is already completed"),
            ));
        }

        let mut updated = Vec::with_capacity(finalized.stat_lines.len());
        for (id, line) in &finalized.stat_lines {
            let mut player = tables.players.get(id).cloned().ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("Player {id} not found"))
            })?;
            player.stats.apply(line);
            updated.push(player);
        }

        tables
            .matches
            .insert(match_id.clone(), finalized.record.clone());
        for player in &updated {
            debug!(player_id = %player.id, matches = player.stats.matches, "Player stats updated");
            tables.players.insert(player.id.clone(), player.clone());
        }
        info!(match_id = %match_id, players = updated.len(), "Finalization committed");
        Ok(updated)
    }
}

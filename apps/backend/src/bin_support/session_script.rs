//! Scripted scoring sessions.
//!
//! A script registers players, schedules one match and feeds the scoring
//! commands in order. Replaying it against a store yields the persisted
//! match and the participants' updated career stats.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ScoringConfig;
use crate::domain::rankings::Rankings;
use crate::domain::{Match, Player};
use crate::error::AppError;
use crate::infra::InMemoryStore;
use crate::services::{
    MatchFlowService, MatchService, NewMatch, NewPlayer, PlayerService, ScoringCommand,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionScript {
    pub players: Vec<NewPlayer>,
    #[serde(rename = "match")]
    pub match_: NewMatch,
    pub commands: Vec<ScoringCommand>,
}

impl SessionScript {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    #[serde(rename = "match")]
    pub match_: Match,
    pub players: Vec<Player>,
    pub rankings: Rankings,
}

/// Replay a script against a fresh in-memory store.
///
/// Fails on the first rejected command, or if the commands leave the match
/// unfinished.
pub async fn replay(script: SessionScript, config: ScoringConfig) -> Result<ReplayReport, AppError> {
    let store = InMemoryStore::new();
    let players = PlayerService::new(store.clone());
    let matches = MatchService::new(store.clone(), store.clone());
    let flow = MatchFlowService::from_store(store, config);

    for new in script.players {
        players.register_player(new).await?;
    }
    let scheduled = matches.schedule_match(script.match_).await?;
    flow.start_scoring(&scheduled.id).await?;

    let total = script.commands.len();
    for (index, command) in script.commands.into_iter().enumerate() {
        flow.apply(command)
            .map_err(|e| e.with_context(format!("command {} of {total}", index + 1)))?;
    }

    let persisted = flow.finalize_and_persist().await?;
    info!(
        match_id = %persisted.finalized.record.id,
        commands = total,
        "Script replayed"
    );
    Ok(ReplayReport {
        match_: persisted.finalized.record,
        players: persisted.players,
        rankings: players.rankings().await?,
    })
}

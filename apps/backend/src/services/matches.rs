//! Match scheduling service.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;
use ulid::Ulid;

use crate::domain::{Match, MatchId, MatchStatus, PlayerId, TeamInMatch};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{MatchRepo, PlayerRepo};

const MIN_NAME_LEN: usize = 2;
const MIN_ROSTER: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub players: Vec<PlayerId>,
}

/// Scheduling request. `id` is generated when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    #[serde(default)]
    pub id: Option<MatchId>,
    pub overs: u32,
    pub venue: String,
    pub teams: [NewTeam; 2],
    #[serde(default)]
    pub tournament_id: Option<String>,
}

fn invalid(detail: impl Into<String>) -> AppError {
    DomainError::validation(ValidationKind::InvalidMatchSetup, detail).into()
}

/// Shape checks that need no store access.
pub fn validate_new_match(new: &NewMatch) -> Result<(), AppError> {
    if new.overs < 1 {
        return Err(invalid("A match needs at least one over"));
    }
    if new.venue.trim().chars().count() < MIN_NAME_LEN {
        return Err(invalid("Venue must be at least 2 characters"));
    }
    for team in &new.teams {
        if team.name.trim().chars().count() < MIN_NAME_LEN {
            return Err(invalid("Team names must be at least 2 characters"));
        }
        if team.players.len() < MIN_ROSTER {
            return Err(invalid(format!(
                "{} needs at least {MIN_ROSTER} players",
                team.name.trim()
            )));
        }
        let unique: HashSet<&PlayerId> = team.players.iter().collect();
        if unique.len() != team.players.len() {
            return Err(invalid(format!(
                "{} lists a player twice",
                team.name.trim()
            )));
        }
    }
    let [first, second] = &new.teams;
    if first.name.trim().to_lowercase() == second.name.trim().to_lowercase() {
        return Err(invalid("Both teams have the same name"));
    }
    if let Some(shared) = first.players.iter().find(|id| second.players.contains(id)) {
        return Err(invalid(format!("Player {shared} is on both teams")));
    }
    Ok(())
}

pub struct MatchService<M: MatchRepo, P: PlayerRepo> {
    matches: M,
    players: P,
}

impl<M: MatchRepo, P: PlayerRepo> MatchService<M, P> {
    pub fn new(matches: M, players: P) -> Self {
        Self { matches, players }
    }

    /// Validate and store a match as `scheduled` with zeroed totals.
    pub async fn schedule_match(&self, new: NewMatch) -> Result<Match, AppError> {
        validate_new_match(&new)?;
        for team in &new.teams {
            self.players.players_by_ids(&team.players).await?;
        }

        let [first, second] = new.teams;
        let record = Match {
            id: new.id.unwrap_or_else(|| Ulid::new().to_string()),
            overs: new.overs,
            venue: new.venue.trim().to_string(),
            teams: [
                TeamInMatch::new(first.name.trim(), first.players),
                TeamInMatch::new(second.name.trim(), second.players),
            ],
            status: MatchStatus::Scheduled,
            result: None,
            player_of_the_match: None,
            scorecard: None,
            tournament_id: new.tournament_id,
            completed_at: None,
        };
        let stored = self.matches.insert_match(record).await?;
        info!(match_id = %stored.id, overs = stored.overs, venue = %stored.venue, "Match scheduled");
        Ok(stored)
    }

    pub async fn list_matches(&self) -> Result<Vec<Match>, AppError> {
        Ok(self.matches.list_matches().await?)
    }

    pub async fn get_match(&self, id: &MatchId) -> Result<Match, AppError> {
        Ok(self.matches.require_match(id).await?)
    }
}

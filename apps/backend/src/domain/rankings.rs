//! Leaderboards over career statistics.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::players::Player;
use crate::domain::state::PlayerId;
use crate::domain::stats::impact_score;

/// Entries kept per leaderboard.
pub const RANKING_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
    pub impact: f64,
}

impl RankingEntry {
    fn from_player(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            name: player.name.clone(),
            matches: player.stats.matches,
            runs: player.stats.runs,
            wickets: player.stats.wickets,
            impact: impact_score(player.stats.runs, player.stats.wickets),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub batsmen: Vec<RankingEntry>,
    pub bowlers: Vec<RankingEntry>,
    pub all_rounders: Vec<RankingEntry>,
}

fn top_by<F>(entries: &[RankingEntry], cmp: F) -> Vec<RankingEntry>
where
    F: Fn(&RankingEntry, &RankingEntry) -> Ordering,
{
    let mut sorted = entries.to_vec();
    // Stable: ties keep input order.
    sorted.sort_by(|a, b| cmp(b, a));
    sorted.truncate(RANKING_SIZE);
    sorted
}

/// Top batsmen by runs, bowlers by wickets and all-rounders by impact,
/// among players with at least one match.
pub fn calculate_rankings(players: &[Player]) -> Rankings {
    let entries: Vec<RankingEntry> = players
        .iter()
        .filter(|p| p.stats.matches > 0)
        .map(RankingEntry::from_player)
        .collect();

    Rankings {
        batsmen: top_by(&entries, |a, b| a.runs.cmp(&b.runs)),
        bowlers: top_by(&entries, |a, b| a.wickets.cmp(&b.wickets)),
        all_rounders: top_by(&entries, |a, b| a.impact.total_cmp(&b.impact)),
    }
}

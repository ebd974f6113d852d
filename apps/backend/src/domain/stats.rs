//! Per-match statistic lines and their fold into career records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::matches::Scorecard;
use crate::domain::overs::Overs;
use crate::domain::players::{BowlingFigure, PlayerStats};
use crate::domain::state::PlayerId;

/// Weight of a run in the impact score.
pub const IMPACT_PER_RUN: f64 = 0.4;
/// Weight of a wicket in the impact score.
pub const IMPACT_PER_WICKET: f64 = 20.0;

/// Combined batting and bowling value, used for player of the match and
/// the all-rounder ranking.
pub fn impact_score(runs: u32, wickets: u32) -> f64 {
    runs as f64 * IMPACT_PER_RUN + wickets as f64 * IMPACT_PER_WICKET
}

/// One player's contribution to a single match, summed over both innings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub runs: u32,
    pub balls_faced: u32,
    pub wickets: u32,
    pub runs_conceded: u32,
    pub overs_bowled: Overs,
    pub dismissed: bool,
}

impl StatLine {
    /// Whether the player delivered anything, wides included.
    pub fn bowled(&self) -> bool {
        self.overs_bowled.balls() > 0 || self.runs_conceded > 0
    }

    pub fn bowling_figure(&self) -> BowlingFigure {
        BowlingFigure::new(self.wickets, self.runs_conceded)
    }

    pub fn impact(&self) -> f64 {
        impact_score(self.runs, self.wickets)
    }
}

/// Stat lines for every player appearing in either innings' batting or
/// bowling map.
pub fn collect_stat_lines(scorecard: &Scorecard) -> BTreeMap<PlayerId, StatLine> {
    let mut lines: BTreeMap<PlayerId, StatLine> = BTreeMap::new();
    for innings in &scorecard.innings {
        for (id, bat) in &innings.batting {
            let line = lines.entry(id.clone()).or_default();
            line.runs += bat.runs;
            line.balls_faced += bat.balls;
            line.dismissed |= bat.out;
        }
        for (id, bowl) in &innings.bowling {
            let line = lines.entry(id.clone()).or_default();
            line.wickets += bowl.wickets;
            line.runs_conceded += bowl.runs;
            line.overs_bowled += bowl.overs;
        }
    }
    lines
}

impl PlayerStats {
    /// Fold one match into the career record and recompute the rates.
    pub fn apply(&mut self, line: &StatLine) {
        self.matches += 1;
        self.runs += line.runs;
        self.balls_faced += line.balls_faced;
        self.wickets += line.wickets;
        self.runs_conceded += line.runs_conceded;
        self.overs_bowled += line.overs_bowled;
        if line.dismissed {
            self.times_out += 1;
        }
        self.best_score = self.best_score.max(line.runs);
        if line.bowled() {
            let figure = line.bowling_figure();
            self.best_bowling = Some(self.best_bowling.map_or(figure, |best| best.best(figure)));
        }
        self.recompute_rates();
    }
}

//! Domain layer: pure scoring logic and match types.

pub mod finalization;
pub mod lineup;
pub mod matches;
pub mod overs;
pub mod players;
pub mod rankings;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod toss;
pub mod transitions;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_innings;
#[cfg(test)]
mod tests_props_scoring;

// Re-exports for ergonomics
pub use finalization::{FinalizedMatch, TerminationReason};
pub use matches::{
    BattingEntry, BowlingEntry, Innings, InningsNo, Match, MatchStatus, Scorecard, TeamInMatch,
    TeamIndex,
};
pub use overs::{Overs, BALLS_PER_OVER};
pub use players::{BowlingFigure, Player, PlayerRole, PlayerStats};
pub use scoring::{BallOutcome, ExtraKind};
pub use snapshot::{MatchSnapshot, PhaseSnapshot};
pub use state::{LiveMatchState, MatchId, Phase, PlayerId};
pub use stats::StatLine;
pub use toss::TossChoice;

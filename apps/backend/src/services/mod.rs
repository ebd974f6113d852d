//! Services bridge the pure scoring domain with the repositories.

pub mod match_flow;
pub mod matches;
pub mod players;
pub mod scoring_engine;

pub use match_flow::{MatchFlowService, PersistedMatch};
pub use matches::{MatchService, NewMatch, NewTeam};
pub use players::{NewPlayer, PlayerService};
pub use scoring_engine::{CommandResult, ScoringCommand, ScoringEngine};

//! Repository traits the scoring services depend on.
//!
//! Implementations must be `Send + Sync`; the in-memory store in
//! `infra::memory` implements all three.

pub mod finalization;
pub mod matches;
pub mod players;

pub use finalization::FinalizationRepo;
pub use matches::MatchRepo;
pub use players::PlayerRepo;

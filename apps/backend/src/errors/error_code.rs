//! Error codes for the scoring backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes render as SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Scoring command validation
    /// Command not accepted in the current phase
    PhaseMismatch,
    /// Toss already performed
    TossAlreadyPerformed,
    /// Toss not yet performed
    TossNotPerformed,
    /// Runs value not scorable off the bat
    InvalidRuns,
    /// Striker and non-striker are the same player
    SamePlayer,
    /// Player not part of the relevant roster
    PlayerNotInRoster,
    /// Batsman already dismissed this innings
    BatsmanAlreadyOut,
    /// Bowler bowled the previous over
    BowlerRepeated,
    /// Player who must be retained was replaced
    RetainedPlayerChanged,
    /// Match already completed
    MatchCompleted,
    /// Match configuration rejected at scheduling
    InvalidMatchSetup,
    /// Player registration rejected
    InvalidPlayer,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Match not found
    MatchNotFound,
    /// Player not found
    PlayerNotFound,
    /// No live scoring session
    SessionNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Another player already uses this name
    DuplicatePlayerName,
    /// Match is not in the scheduled state
    MatchNotScheduled,
    /// Match was already finalized
    MatchAlreadyCompleted,
    /// A scoring session is already open
    SessionActive,
    /// Completed match not yet persisted
    FinalizationPending,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Store unavailable
    StoreUnavailable,
    /// Store timeout
    StoreTimeout,
    /// Data corruption detected
    DataCorruption,
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::TossAlreadyPerformed => "TOSS_ALREADY_PERFORMED",
            Self::TossNotPerformed => "TOSS_NOT_PERFORMED",
            Self::InvalidRuns => "INVALID_RUNS",
            Self::SamePlayer => "SAME_PLAYER",
            Self::PlayerNotInRoster => "PLAYER_NOT_IN_ROSTER",
            Self::BatsmanAlreadyOut => "BATSMAN_ALREADY_OUT",
            Self::BowlerRepeated => "BOWLER_REPEATED",
            Self::RetainedPlayerChanged => "RETAINED_PLAYER_CHANGED",
            Self::MatchCompleted => "MATCH_COMPLETED",
            Self::InvalidMatchSetup => "INVALID_MATCH_SETUP",
            Self::InvalidPlayer => "INVALID_PLAYER",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicatePlayerName => "DUPLICATE_PLAYER_NAME",
            Self::MatchNotScheduled => "MATCH_NOT_SCHEDULED",
            Self::MatchAlreadyCompleted => "MATCH_ALREADY_COMPLETED",
            Self::SessionActive => "SESSION_ACTIVE",
            Self::FinalizationPending => "FINALIZATION_PENDING",
            Self::Conflict => "CONFLICT",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

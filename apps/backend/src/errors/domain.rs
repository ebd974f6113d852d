//! Domain-level error type used across the engine, services and repositories.
//!
//! Storage- and transport-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through the provided `From<DomainError> for AppError` implementation.

use thiserror::Error;

/// Precondition violations raised by scoring commands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Command issued in a phase that does not accept it.
    PhaseMismatch,
    TossAlreadyPerformed,
    TossNotPerformed,
    /// Runs outside {0, 1, 2, 3, 4, 6}.
    InvalidRuns,
    /// Striker and non-striker are the same player.
    SamePlayer,
    PlayerNotInRoster,
    BatsmanAlreadyOut,
    /// Bowler bowled the over that just finished.
    BowlerRepeated,
    /// A player who must stay at the crease (or keep bowling) was replaced.
    RetainedPlayerChanged,
    MatchCompleted,
    InvalidMatchSetup,
    InvalidPlayer,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Match,
    Player,
    Session,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicatePlayerName,
    MatchNotScheduled,
    MatchAlreadyCompleted,
    SessionActive,
    FinalizationPending,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input validation or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// The validation kind, if this is a precondition violation.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}

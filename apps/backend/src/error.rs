use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Store error: {detail}")]
    Store { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Error code for any variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Store { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Human-readable detail for any variant
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Store { detail, .. }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail,
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Store {
                code: ErrorCode::StoreUnavailable | ErrorCode::StoreTimeout,
                ..
            }
        )
    }

    /// Prefix the detail, keeping the variant and code.
    pub fn with_context(self, context: impl std::fmt::Display) -> Self {
        match self {
            AppError::Validation { code, detail } => AppError::Validation {
                code,
                detail: format!("{context}: {detail}"),
            },
            AppError::NotFound { code, detail } => AppError::NotFound {
                code,
                detail: format!("{context}: {detail}"),
            },
            AppError::Conflict { code, detail } => AppError::Conflict {
                code,
                detail: format!("{context}: {detail}"),
            },
            AppError::Store { code, detail } => AppError::Store {
                code,
                detail: format!("{context}: {detail}"),
            },
            AppError::Internal { detail } => AppError::Internal {
                detail: format!("{context}: {detail}"),
            },
            AppError::Config { detail } => AppError::Config {
                detail: format!("{context}: {detail}"),
            },
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::internal(format!("io error: {e}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::invalid(ErrorCode::ValidationError, format!("json error: {e}"))
    }
}

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
        ValidationKind::TossAlreadyPerformed => ErrorCode::TossAlreadyPerformed,
        ValidationKind::TossNotPerformed => ErrorCode::TossNotPerformed,
        ValidationKind::InvalidRuns => ErrorCode::InvalidRuns,
        ValidationKind::SamePlayer => ErrorCode::SamePlayer,
        ValidationKind::PlayerNotInRoster => ErrorCode::PlayerNotInRoster,
        ValidationKind::BatsmanAlreadyOut => ErrorCode::BatsmanAlreadyOut,
        ValidationKind::BowlerRepeated => ErrorCode::BowlerRepeated,
        ValidationKind::RetainedPlayerChanged => ErrorCode::RetainedPlayerChanged,
        ValidationKind::MatchCompleted => ErrorCode::MatchCompleted,
        ValidationKind::InvalidMatchSetup => ErrorCode::InvalidMatchSetup,
        ValidationKind::InvalidPlayer => ErrorCode::InvalidPlayer,
        ValidationKind::Other(_) => ErrorCode::ValidationError,
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::Validation {
                code: validation_code(&kind),
                detail,
            },
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Match => ErrorCode::MatchNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::DuplicatePlayerName => ErrorCode::DuplicatePlayerName,
                    ConflictKind::MatchNotScheduled => ErrorCode::MatchNotScheduled,
                    ConflictKind::MatchAlreadyCompleted => ErrorCode::MatchAlreadyCompleted,
                    ConflictKind::SessionActive => ErrorCode::SessionActive,
                    ConflictKind::FinalizationPending => ErrorCode::FinalizationPending,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::Store {
                    code: ErrorCode::StoreTimeout,
                    detail,
                },
                InfraErrorKind::StoreUnavailable => AppError::Store {
                    code: ErrorCode::StoreUnavailable,
                    detail,
                },
                InfraErrorKind::DataCorruption => AppError::Store {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::internal(detail),
            },
        }
    }
}

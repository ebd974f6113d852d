// Unit tests for error mapping - pure domain logic, no store involved
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds_to_codes() {
    let de = DomainError::validation(ValidationKind::BowlerRepeated, "same bowler");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::BowlerRepeated);
    assert_eq!(app.detail(), "same bowler");

    let other = DomainError::validation_other("something odd");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_conflicts() {
    let dup = DomainError::conflict(ConflictKind::DuplicatePlayerName, "name taken");
    let app: AppError = dup.into();
    assert_eq!(app.code().as_str(), "DUPLICATE_PLAYER_NAME");

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Player, "no player");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "PLAYER_NOT_FOUND");
    assert!(matches!(app, AppError::NotFound { .. }));
}

#[test]
fn maps_infra_and_retryability() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "STORE_TIMEOUT");
    assert!(app.is_retryable());

    let down = DomainError::infra(InfraErrorKind::StoreUnavailable, "down");
    let app: AppError = down.into();
    assert!(app.is_retryable());

    let corrupt = DomainError::infra(InfraErrorKind::DataCorruption, "bad row");
    let app: AppError = corrupt.into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert!(!app.is_retryable());
}

#[test]
fn maps_session_kinds() {
    let active = DomainError::conflict(ConflictKind::SessionActive, "busy");
    assert_eq!(AppError::from(active).code(), ErrorCode::SessionActive);

    let pending = DomainError::conflict(ConflictKind::FinalizationPending, "unsaved");
    assert_eq!(AppError::from(pending).code(), ErrorCode::FinalizationPending);

    let missing = DomainError::not_found(NotFoundKind::Session, "no session");
    let app = AppError::from(missing);
    assert_eq!(app.code(), ErrorCode::SessionNotFound);
    assert!(matches!(app, AppError::NotFound { .. }));
}

#[test]
fn context_keeps_variant_and_code() {
    let app: AppError =
        DomainError::not_found(NotFoundKind::Player, "Player x not found").into();
    let wrapped = app.with_context("command 3 of 9");
    assert!(matches!(wrapped, AppError::NotFound { .. }));
    assert_eq!(wrapped.code(), ErrorCode::PlayerNotFound);
    assert_eq!(wrapped.detail(), "command 3 of 9: Player x not found");
}

use std::sync::Arc;

use backend::config::ScoringConfig;
use backend::domain::{MatchStatus, PhaseSnapshot};
use backend::errors::domain::ConflictKind;
use backend::errors::{DomainError, ErrorCode};
use backend::repos::{FinalizationRepo, MatchRepo, PlayerRepo};
use backend::{AppError, InMemoryStore, MatchFlowService};

use crate::support::driver::play_short_match;
use crate::support::factory::seed_match;
use crate::support::flaky_store::{Failure, FlakyFinalization};

fn flow_with(
    store: &InMemoryStore,
    finalization: Arc<FlakyFinalization>,
    attempts: u32,
) -> MatchFlowService {
    MatchFlowService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        finalization,
        ScoringConfig::default()
            .with_toss_seed(9)
            .with_commit_attempts(attempts),
    )
}

async fn total_matches_played(store: &InMemoryStore) -> u32 {
    store
        .list_players()
        .await
        .unwrap()
        .iter()
        .map(|p| p.stats.matches)
        .sum()
}

#[tokio::test]
async fn transient_failures_are_retried() -> Result<(), AppError> {
    let store = InMemoryStore::new();
    let scheduled = seed_match(&store, 1, 2).await?;
    let flaky = Arc::new(FlakyFinalization::new(store.clone(), Failure::Unavailable, 2));
    let flow = flow_with(&store, flaky.clone(), 3);

    flow.start_scoring(&scheduled.id).await?;
    play_short_match(&flow)?;
    let persisted = flow.finalize_and_persist().await?;

    assert_eq!(persisted.attempt, 2);
    assert_eq!(flaky.calls(), 3);
    assert_eq!(
        store.require_match(&scheduled.id).await?.status,
        MatchStatus::Completed
    );
    Ok(())
}

#[tokio::test]
async fn exhausted_retries_keep_the_result_pending() -> Result<(), AppError> {
    let store = InMemoryStore::new();
    let scheduled = seed_match(&store, 1, 2).await?;
    let flaky = Arc::new(FlakyFinalization::new(store.clone(), Failure::Unavailable, 2));
    let flow = flow_with(&store, flaky.clone(), 2);

    flow.start_scoring(&scheduled.id).await?;
    play_short_match(&flow)?;

    let err = flow.finalize_and_persist().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    assert!(err.is_retryable());
    assert_eq!(flaky.calls(), 2);

    // Nothing was written and the session still holds the result.
    assert_eq!(
        store.require_match(&scheduled.id).await?.status,
        MatchStatus::Live
    );
    assert_eq!(total_matches_played(&store).await, 0);
    assert!(matches!(
        flow.snapshot()?.phase,
        PhaseSnapshot::Completed { .. }
    ));

    let persisted = flow.finalize_and_persist().await?;
    assert_eq!(persisted.attempt, 0);
    assert_eq!(
        store.require_match(&scheduled.id).await?.status,
        MatchStatus::Completed
    );
    Ok(())
}

#[tokio::test]
async fn lost_acknowledgement_does_not_double_count() -> Result<(), AppError> {
    let store = InMemoryStore::new();
    let scheduled = seed_match(&store, 1, 2).await?;
    let flaky = Arc::new(FlakyFinalization::new(store.clone(), Failure::LostAck, 1));
    let flow = flow_with(&store, flaky.clone(), 3);

    flow.start_scoring(&scheduled.id).await?;
    play_short_match(&flow)?;
    assert_eq!(total_matches_played(&store).await, 0);

    // The first write lands, the retry finds the same record already stored.
    let persisted = flow.finalize_and_persist().await?;
    assert_eq!(persisted.attempt, 1);
    assert_eq!(flaky.calls(), 2);
    assert_eq!(
        store.require_match(&scheduled.id).await?,
        persisted.finalized.record
    );
    assert!(persisted.players.iter().all(|p| p.stats.matches == 1));

    let players = store.list_players().await?;
    assert!(players.iter().all(|p| p.stats.matches <= 1));
    assert!(total_matches_played(&store).await > 0);

    // The session is closed, so the next match can be scored.
    assert_eq!(flow.snapshot().unwrap_err().code(), ErrorCode::SessionNotFound);
    let next = seed_match(&store, 1, 2).await?;
    flow.start_scoring(&next.id).await?;
    Ok(())
}

#[tokio::test]
async fn pending_result_cannot_be_abandoned() -> Result<(), AppError> {
    let store = InMemoryStore::new();
    let scheduled = seed_match(&store, 1, 2).await?;
    let flaky = Arc::new(FlakyFinalization::new(store.clone(), Failure::Unavailable, 1));
    let flow = flow_with(&store, flaky, 1);

    flow.start_scoring(&scheduled.id).await?;
    play_short_match(&flow)?;
    let err = flow.finalize_and_persist().await.unwrap_err();
    assert!(err.is_retryable());

    let err = flow.abandon_session().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::FinalizationPending);
    assert!(matches!(
        flow.snapshot()?.phase,
        PhaseSnapshot::Completed { .. }
    ));
    assert_eq!(
        store.require_match(&scheduled.id).await?.status,
        MatchStatus::Live
    );

    flow.finalize_and_persist().await?;
    assert_eq!(
        store.require_match(&scheduled.id).await?.status,
        MatchStatus::Completed
    );
    Ok(())
}

#[tokio::test]
async fn store_rejects_a_second_commit_of_the_same_match() -> Result<(), AppError> {
    let store = InMemoryStore::new();
    let scheduled = seed_match(&store, 1, 2).await?;
    let flaky = Arc::new(FlakyFinalization::new(store.clone(), Failure::Unavailable, 0));
    let flow = flow_with(&store, flaky, 1);

    flow.start_scoring(&scheduled.id).await?;
    play_short_match(&flow)?;
    let persisted = flow.finalize_and_persist().await?;
    let before = store.list_players().await?;

    let err = store
        .commit_finalization(&persisted.finalized)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::MatchAlreadyCompleted, _)
    ));
    assert_eq!(store.list_players().await?, before);
    Ok(())
}

use sim_backend::db::txn::with_txn;
use sim_backend::db::txn_policy::{current, TxnPolicy};
use sim_backend::errors::ErrorCode;
use sim_backend::repos::rounds;
use sim_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::seed_round;

#[test]
fn test_binary_runs_with_rollback_policy() {
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
}

/// Test: a successful body is rolled back under the test policy
#[tokio::test]
async fn test_ok_body_is_rolled_back() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let id = with_txn(&state, |txn| {
        Box::pin(async move { Ok::<_, AppError>(seed_round(txn, 1).await?.id) })
    })
    .await?;

    assert!(rounds::find_by_id(state.db(), id).await?.is_none());
    Ok(())
}

/// Test: the body's error is returned unchanged
#[tokio::test]
async fn test_err_body_propagates() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let result: Result<(), AppError> = with_txn(&state, |txn| {
        Box::pin(async move {
            seed_round(txn, 1).await?;
            Err::<(), _>(AppError::unexpected("boom"))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnexpectedError);
    assert_eq!(err.detail(), "boom");
    assert!(rounds::list_all(state.db()).await?.is_empty());
    Ok(())
}

use sim_backend::adapters::moves_sea::{self, MoveCreate};
use sim_backend::db::txn::with_txn;
use sim_backend::errors::domain::DomainError;
use sim_backend::repos::moves;
use sim_backend::AppError;
use uuid::Uuid;

use crate::support::build_test_state;
use crate::support::factory::{seed_move, seed_round};

/// Test: omitted quantities are stored as zero
#[tokio::test]
async fn test_create_move_defaults_to_zero() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let round = seed_round(txn, 1).await?;

            let mv = moves::create_move(txn, round.id, None, Some(12)).await?;
            assert_eq!(mv.round_id, round.id);
            assert_eq!(mv.assistants_allocated, 0);
            assert_eq!(mv.resources, 12);

            let model = moves_sea::create_move(txn, MoveCreate::new(round.id))
                .await
                .map_err(|e| AppError::unexpected(e.to_string()))?;
            assert_eq!(model.assistants_allocated, 0);
            assert_eq!(model.resources, 0);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

/// Test: find_by_round returns only that round's moves
#[tokio::test]
async fn test_find_by_round_scopes_to_round() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let r1 = seed_round(txn, 1).await?;
            let r2 = seed_round(txn, 2).await?;

            seed_move(txn, r1.id, 4, 10).await?;
            seed_move(txn, r1.id, 2, 0).await?;
            seed_move(txn, r2.id, 9, 9).await?;

            let found = moves::find_by_round(txn, r1.id).await?;
            assert_eq!(found.len(), 2);
            assert!(found.iter().all(|m| m.round_id == r1.id));

            let mut totals: Vec<(u32, u32)> = found
                .iter()
                .map(|m| (m.assistants_allocated, m.resources))
                .collect();
            totals.sort_unstable();
            assert_eq!(totals, vec![(2, 0), (4, 10)]);

            assert!(moves::find_by_round(txn, Uuid::new_v4()).await?.is_empty());

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

/// Test: joined listing is ordered by round number
#[tokio::test]
async fn test_list_with_round_number_orders_by_round() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let later = seed_round(txn, 5).await?;
            let earlier = seed_round(txn, 2).await?;

            seed_move(txn, later.id, 1, 1).await?;
            seed_move(txn, earlier.id, 3, 3).await?;
            seed_move(txn, later.id, 2, 2).await?;

            let rows = moves::list_with_round_number(txn).await?;
            let numbers: Vec<i32> = rows.iter().map(|r| r.round_number).collect();
            assert_eq!(numbers, vec![2, 5, 5]);
            assert_eq!(rows[0].mv.round_id, earlier.id);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

/// Test: a move must reference an existing round
#[tokio::test]
async fn test_move_for_unknown_round_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let err = seed_move(txn, Uuid::new_v4(), 1, 1).await.unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(_)),
                "unexpected error: {err:?}"
            );
            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

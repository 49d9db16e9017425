use sim_backend::services::rounds::MOVES_CSV_HEADER;
use sim_backend::services::RoundsService;
use sim_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::{seed_move, seed_round, seed_round_with_notes};

#[tokio::test]
async fn test_dm_timeline_includes_open_rounds_and_notes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    seed_round_with_notes(state.db(), 2, "lean on the mayor").await?;
    seed_round(state.db(), 1).await?;

    let service = RoundsService::from_state(&state);
    let rounds = service.dm_timeline(state.db()).await?;

    let numbers: Vec<i32> = rounds.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(rounds[1].dm_notes.as_deref(), Some("lean on the mayor"));
    Ok(())
}

#[tokio::test]
async fn test_public_timeline_only_closed_rounds() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let open = seed_round(state.db(), 1).await?;
    let closed = seed_round(state.db(), 2).await?;
    sim_backend::repos::rounds::close_round(state.db(), closed.id, "results".to_string()).await?;

    let service = RoundsService::from_state(&state);
    let rounds = service.public_timeline(state.db()).await?;

    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].id, closed.id);
    assert!(rounds.iter().all(|r| r.id != open.id));
    Ok(())
}

#[tokio::test]
async fn test_export_lists_moves_by_round_number() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let second = seed_round(state.db(), 2).await?;
    let first = seed_round(state.db(), 1).await?;
    seed_move(state.db(), second.id, 7, 8).await?;
    let early = seed_move(state.db(), first.id, 4, 10).await?;

    let csv = RoundsService::from_state(&state)
        .export_moves_csv(state.db())
        .await?;

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, MOVES_CSV_HEADER.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][0], "1");
    assert_eq!(&records[0][1], early.id.to_string());
    assert_eq!(&records[0][3], "4");
    assert_eq!(&records[0][4], "10");
    assert_eq!(&records[1][0], "2");
    Ok(())
}

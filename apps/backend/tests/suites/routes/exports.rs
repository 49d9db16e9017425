use actix_web::http::{header, StatusCode};
use actix_web::test;
use sim_backend::AppError;

use crate::support::build_test_state;
use crate::support::call;
use crate::support::factory::{seed_move, seed_round};

#[actix_web::test]
async fn test_moves_export_is_csv_attachment() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let round = seed_round(state.db(), 3).await?;
    let mv = seed_move(state.db(), round.id, 4, 10).await?;

    let resp = call(&state, test::TestRequest::get().uri("/api/moves/export.csv")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/csv"));
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert_eq!(
        disposition.to_str().unwrap(),
        "attachment; filename=\"moves.csv\""
    );

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "round_number,move_id,round_id,assistants_allocated,resources,created_at"
    );
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with(&format!("3,{},{},4,10,", mv.id, round.id)));
    Ok(())
}

#[actix_web::test]
async fn test_empty_export_has_header_only() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(&state, test::TestRequest::get().uri("/api/moves/export.csv")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        "round_number,move_id,round_id,assistants_allocated,resources,created_at\n"
    );
    Ok(())
}

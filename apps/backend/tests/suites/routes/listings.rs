use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use sim_backend::AppError;

use crate::support::build_test_state;
use crate::support::call;
use crate::support::factory::{seed_round, seed_round_with_notes};

#[actix_web::test]
async fn test_dm_listing_has_every_round_with_notes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    seed_round_with_notes(state.db(), 2, "the council will fold").await?;
    seed_round(state.db(), 1).await?;

    let resp = call(&state, test::TestRequest::get().uri("/api/rounds")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let rounds = body.as_array().unwrap();

    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0]["number"], 1);
    assert_eq!(rounds[0]["isOpen"], true);
    assert_eq!(rounds[0]["dmNotes"], Value::Null);
    assert_eq!(rounds[1]["number"], 2);
    assert_eq!(rounds[1]["dmNotes"], "the council will fold");
    assert_eq!(rounds[1]["publicBrief"], "Brief for round 2");
    Ok(())
}

#[actix_web::test]
async fn test_public_listing_hides_open_rounds_and_notes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let resolved = seed_round_with_notes(state.db(), 1, "never shown").await?;
    seed_round_with_notes(state.db(), 2, "also never shown").await?;

    let resolve = test::TestRequest::post()
        .uri("/api/rounds/resolve")
        .set_json(json!({ "roundId": resolved.id }));
    assert_eq!(call(&state, resolve).await.status(), StatusCode::OK);

    let resp = call(&state, test::TestRequest::get().uri("/api/rounds/public")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let rounds = body.as_array().unwrap();

    assert_eq!(rounds.len(), 1);
    let round = rounds[0].as_object().unwrap();
    assert_eq!(round["id"], json!(resolved.id));
    assert!(!round.contains_key("dmNotes"));
    assert!(!round.contains_key("isOpen"));
    assert!(round["publicResults"]
        .as_str()
        .unwrap()
        .starts_with("Stakeholder influence changed by"));
    Ok(())
}

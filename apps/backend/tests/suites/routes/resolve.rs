use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_body_from_service_response;
use serde_json::{json, Value};
use sim_backend::domain::{RandomSource, ResolutionDraws};
use sim_backend::repos::{hidden_state, rounds};
use sim_backend::AppError;
use uuid::Uuid;

use crate::support::factory::{seed_move, seed_round};
use crate::support::{build_test_state, build_test_state_with_rng, call};

fn resolve_request(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/rounds/resolve")
        .set_json(body)
}

#[derive(Debug)]
struct PanickingSource;

impl RandomSource for PanickingSource {
    fn draw(&self) -> ResolutionDraws {
        panic!("entropy source failed");
    }
}

#[actix_web::test]
async fn test_resolve_returns_success_and_closes_round() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let round = seed_round(state.db(), 1).await?;
    seed_move(state.db(), round.id, 4, 10).await?;
    seed_move(state.db(), round.id, 2, 0).await?;

    let resp = call(&state, resolve_request(json!({ "roundId": round.id }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true }));

    let stored = rounds::find_by_id(state.db(), round.id).await?.unwrap();
    assert!(!stored.is_open);
    assert_eq!(
        stored.public_results.as_deref(),
        Some(
            "Stakeholder influence changed by 6.0. Public sentiment improved by 5. \
             Policy quality changed by 1.0."
        )
    );
    Ok(())
}

#[actix_web::test]
async fn test_second_resolve_is_already_closed() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let round = seed_round(state.db(), 1).await?;

    let first = call(&state, resolve_request(json!({ "roundId": round.id }))).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = call(&state, resolve_request(json!({ "roundId": round.id }))).await;
    assert_error_body_from_service_response(second, "ALREADY_CLOSED", Some("already closed"))
        .await;

    assert_eq!(
        hidden_state::find_by_round(state.db(), round.id).await?.len(),
        3
    );
    Ok(())
}

#[actix_web::test]
async fn test_unknown_round_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(
        &state,
        resolve_request(json!({ "roundId": Uuid::new_v4() })),
    )
    .await;
    assert_error_body_from_service_response(resp, "ROUND_NOT_FOUND", Some("Round not found"))
        .await;
    Ok(())
}

#[actix_web::test]
async fn test_non_uuid_round_id_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(&state, resolve_request(json!({ "roundId": "round-one" }))).await;
    assert_error_body_from_service_response(resp, "ROUND_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let req = test::TestRequest::post()
        .uri("/api/rounds/resolve")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"roundId\": ");
    let resp = call(&state, req).await;
    assert_error_body_from_service_response(resp, "BAD_REQUEST", Some("Invalid JSON")).await;
    Ok(())
}

#[actix_web::test]
async fn test_missing_round_id_is_bad_request() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(&state, resolve_request(json!({ "round": "x" }))).await;
    let body = assert_error_body_from_service_response(resp, "BAD_REQUEST", None).await;
    assert!(!body.error.contains("round"), "body must not be echoed: {}", body.error);
    Ok(())
}

#[actix_web::test]
async fn test_panic_during_resolution_is_unexpected_error() -> Result<(), AppError> {
    let state = build_test_state_with_rng(Arc::new(PanickingSource)).await?;
    let round = seed_round(state.db(), 1).await?;

    let resp = call(&state, resolve_request(json!({ "roundId": round.id }))).await;
    assert_error_body_from_service_response(resp, "UNEXPECTED_ERROR", None).await;

    let stored = rounds::find_by_id(state.db(), round.id).await?.unwrap();
    assert!(stored.is_open, "a failed resolution must leave the round open");
    assert!(hidden_state::find_by_round(state.db(), round.id)
        .await?
        .is_empty());
    Ok(())
}

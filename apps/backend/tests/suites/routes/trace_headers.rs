use actix_web::test;
use backend_test_support::error_body::assert_error_body_from_parts;
use serde_json::json;
use sim_backend::AppError;
use uuid::Uuid;

use crate::support::{build_test_state, call};

fn request_id(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get("x-request-id")
        .expect("x-request-id header should be present")
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn test_generated_request_id_is_uuid() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(&state, test::TestRequest::get().uri("/health")).await;
    assert!(Uuid::parse_str(&request_id(&resp)).is_ok());
    Ok(())
}

#[actix_web::test]
async fn test_caller_request_id_is_reused() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let incoming = Uuid::new_v4().to_string();

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", incoming.as_str()));
    let resp = call(&state, req).await;
    assert_eq!(request_id(&resp), incoming);
    Ok(())
}

#[actix_web::test]
async fn test_malformed_request_id_is_replaced() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", "not-a-uuid"));
    let resp = call(&state, req).await;
    let id = request_id(&resp);
    assert_ne!(id, "not-a-uuid");
    assert!(Uuid::parse_str(&id).is_ok());
    Ok(())
}

#[actix_web::test]
async fn test_error_trace_id_matches_request_id() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let incoming = Uuid::new_v4().to_string();

    let req = test::TestRequest::post()
        .uri("/api/rounds/resolve")
        .insert_header(("x-request-id", incoming.as_str()))
        .set_json(json!({ "roundId": Uuid::new_v4() }));
    let resp = call(&state, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    let parsed = assert_error_body_from_parts(status, &headers, &body, "ROUND_NOT_FOUND", None);
    assert_eq!(parsed.trace_id, incoming);
    Ok(())
}

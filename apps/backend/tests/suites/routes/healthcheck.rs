use actix_web::test;
use serde_json::Value;
use sim_backend::AppError;

use crate::support::{build_test_state, call};

#[actix_web::test]
async fn test_health_endpoint() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(&state, test::TestRequest::get().uri("/health")).await;
    assert!(resp.status().is_success());
    assert_eq!(resp.status().as_u16(), 200);

    let body = test::read_body(resp).await;
    assert_eq!(body, "ok");
    Ok(())
}

#[actix_web::test]
async fn test_readiness_reports_storage_and_schema() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(&state, test::TestRequest::get().uri("/health/ready")).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20251019_000001_init");
    assert!(body["time"].as_str().is_some());
    Ok(())
}

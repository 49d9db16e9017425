//! Error body test helpers
//!
//! Every failure the backend reports is rendered as HTTP 400 with a JSON body
//! `{"error": ..., "code": ..., "trace_id": ...}` and an `x-trace-id` header.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert that response parts conform to the error contract.
///
/// Validates:
/// - HTTP status is 400
/// - x-trace-id header exists and matches body trace_id
/// - code matches, and error contains the expected substring when given
pub fn assert_error_body_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_code: &str,
    expected_error_contains: Option<&str>,
) -> ErrorBodyLike {
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: ErrorBodyLike =
        serde_json::from_slice(body_bytes).expect("Response body should be a JSON error body");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");

    assert_eq!(
        body.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
    assert_eq!(body.code, expected_code);

    if let Some(expected) = expected_error_contains {
        assert!(
            body.error.contains(expected),
            "Expected error to contain '{}', but got '{}'",
            expected,
            body.error
        );
    }

    body
}

/// Assert that a ServiceResponse conforms to the error contract.
pub async fn assert_error_body_from_service_response(
    resp: actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    expected_code: &str,
    expected_error_contains: Option<&str>,
) -> ErrorBodyLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_error_body_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_error_contains,
    )
}

#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary that declares this module.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Validate that an error response follows the problem-details structure:
/// status, code, content type, and body trace_id matching the x-trace-id
/// header. Returns the parsed body for further assertions.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present")
        .to_string();

    let body: Value = test::read_body_json(resp).await;
    for key in ["type", "title", "status", "detail", "code", "trace_id"] {
        assert!(body.get(key).is_some(), "{key} field should be present");
    }
    assert_eq!(body["code"], expected_code);
    assert_eq!(body["status"], expected_status);
    assert_eq!(
        body["trace_id"].as_str().expect("trace_id should be a string"),
        trace_id,
        "trace_id in body should match x-trace-id header"
    );

    body
}

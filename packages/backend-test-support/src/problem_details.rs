//! Assertions for RFC 7807 error bodies that do not depend on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's error body.
#[derive(Debug, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Check status, headers and body of an error response and return the
/// parsed body.
///
/// Beyond the fields themselves this verifies:
/// - `content-type` is `application/problem+json`
/// - the body's `trace_id` equals the `x-trace-id` header
/// - 401 carries `WWW-Authenticate: Bearer`, 503 carries `Retry-After`,
///   and nothing else carries either
pub fn assert_problem_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> Problem {
    assert_eq!(status, expected_status, "unexpected status");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "content-type must be application/problem+json (got {content_type})"
    );

    let body_str = std::str::from_utf8(body).expect("error body should be UTF-8");
    let problem: Problem = serde_json::from_str(body_str)
        .unwrap_or_else(|e| panic!("error body is not problem details ({e}): {body_str}"));

    let trace_header = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert!(!trace_header.is_empty());
    assert_eq!(problem.trace_id, trace_header);

    match expected_status {
        StatusCode::UNAUTHORIZED => {
            assert_eq!(
                headers.get(WWW_AUTHENTICATE).and_then(|v| v.to_str().ok()),
                Some("Bearer")
            );
            assert!(headers.get(RETRY_AFTER).is_none());
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            assert!(headers.get(RETRY_AFTER).is_some());
            assert!(headers.get(WWW_AUTHENTICATE).is_none());
        }
        _ => {
            assert!(headers.get(WWW_AUTHENTICATE).is_none());
            assert!(headers.get(RETRY_AFTER).is_none());
        }
    }

    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.code, expected_code);
    assert!(problem.type_.ends_with(expected_code), "type: {}", problem.type_);
    if let Some(detail) = expected_detail {
        assert_eq!(problem.detail, detail);
    }
    problem
}

/// [`assert_problem_parts`] over a test `ServiceResponse`.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> Problem {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_problem_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_code,
        expected_detail,
    )
}

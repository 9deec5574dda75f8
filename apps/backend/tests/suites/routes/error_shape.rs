// Problem-details contract shared by every error response.

use actix_web::http::header;
use actix_web::test;
use larder::infra::state::build_state;
use larder::state::security_config::SecurityConfig;

use crate::common::{assert_error, assert_error_code};
use crate::support::create_test_app;
use crate::support::factory::test_state;

#[actix_web::test]
async fn missing_database_is_service_unavailable() {
    let state = build_state()
        .with_security(SecurityConfig::for_tests())
        .build()
        .await
        .expect("state without db");
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/recipes").to_request();
    assert_error(
        test::call_service(&app, req).await,
        503,
        "DB_UNAVAILABLE",
        "Database unavailable",
    )
    .await;
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"username": "alice", "password": }"#)
        .to_request();
    assert_error_code(test::call_service(&app, req).await, 400, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn wrongly_shaped_json_is_unprocessable() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"username": "alice"}"#)
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "missing field `password`",
    )
    .await;
}

#[actix_web::test]
async fn non_numeric_id_is_not_found() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::get().uri("/recipes/soup").to_request();
    let problem =
        assert_error_code(test::call_service(&app, req).await, 404, "NOT_FOUND").await;
    assert!(problem.detail.starts_with("Invalid path"));
}

#[actix_web::test]
async fn trace_id_in_body_matches_header_and_request_id() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::get().uri("/stores/77").to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header");

    let problem = assert_error(resp, 404, "STORE_NOT_FOUND", "Store with ID 77 not found.").await;
    assert_eq!(problem.trace_id, request_id);
}

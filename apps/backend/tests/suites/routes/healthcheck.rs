use actix_web::test;
use larder::infra::state::build_state;
use larder::state::security_config::SecurityConfig;
use serde_json::Value;

use crate::support::create_test_app;
use crate::support::factory::test_state;

#[actix_web::test]
async fn root_says_hello() {
    let app = create_test_app(test_state().await).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, "Hello, from Larder!");
}

#[actix_web::test]
async fn health_reports_version_and_database() {
    let state = test_state().await.with_commit_hash(Some("abc123".into()));
    let app = create_test_app(state).build().await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["commit_hash"], "abc123");
}

#[actix_web::test]
async fn health_without_database_is_unhealthy() {
    let state = build_state()
        .with_security(SecurityConfig::for_tests())
        .build()
        .await
        .expect("state without db");
    let app = create_test_app(state).build().await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert!(body["commit_hash"].is_null());
}

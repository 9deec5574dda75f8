// Bearer token resolution on protected routes.

use std::time::{Duration, SystemTime};

use actix_web::http::header;
use actix_web::test;
use larder::auth::roles::Role;
use larder::mint_access_token;
use larder::state::security_config::JwtConfig;
use serde_json::json;

use crate::common::assert_error;
use crate::support::create_test_app;
use crate::support::factory::{bearer, seed_user, test_state};

const INVALID: &str = "Could not validate credentials.";

fn create_category() -> test::TestRequest {
    test::TestRequest::post()
        .uri("/categories")
        .set_json(json!({ "name": "Soups" }))
}

#[actix_web::test]
async fn missing_header_is_not_authenticated() {
    let app = create_test_app(test_state().await).build().await;

    let resp = test::call_service(&app, create_category().to_request()).await;

    assert_error(resp, 401, "UNAUTHORIZED", "Not authenticated").await;
}

#[actix_web::test]
async fn non_bearer_scheme_is_not_authenticated() {
    let app = create_test_app(test_state().await).build().await;

    let req = create_category()
        .insert_header((header::AUTHORIZATION, "Basic YWxpY2U6cHc="))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "UNAUTHORIZED", "Not authenticated").await;
}

#[actix_web::test]
async fn garbage_token_is_invalid_credentials() {
    let app = create_test_app(test_state().await).build().await;

    let req = create_category()
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "INVALID_CREDENTIALS", INVALID).await;
}

#[actix_web::test]
async fn token_signed_with_another_key_is_rejected() {
    let state = test_state().await;
    seed_user(&state, "root", Role::Admin).await;
    let app = create_test_app(state).build().await;

    let foreign = mint_access_token("root", SystemTime::now(), &JwtConfig::new("other-key"))
        .expect("mint");
    let req = create_category()
        .insert_header((header::AUTHORIZATION, format!("Bearer {foreign}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "INVALID_CREDENTIALS", INVALID).await;
}

#[actix_web::test]
async fn expired_token_is_indistinguishable_from_forged() {
    let state = test_state().await;
    seed_user(&state, "root", Role::Admin).await;
    let jwt = state.security.jwt.clone().expect("signing configured");
    let app = create_test_app(state).build().await;

    let two_years_ago = SystemTime::now() - Duration::from_secs(2 * 365 * 24 * 3600);
    let stale = mint_access_token("root", two_years_ago, &jwt).expect("mint");
    let req = create_category()
        .insert_header((header::AUTHORIZATION, format!("Bearer {stale}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "INVALID_CREDENTIALS", INVALID).await;
}

#[actix_web::test]
async fn token_for_deleted_user_is_invalid() {
    let state = test_state().await;
    let bob = seed_user(&state, "bob", Role::User).await;
    let auth = bearer(&state, &bob);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", bob.id))
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::post()
        .uri("/ingredients")
        .insert_header(auth)
        .set_json(json!({ "name": "salt" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "INVALID_CREDENTIALS", INVALID).await;
}

// POST /auth/token: form login.

use actix_web::test;
use larder::auth::roles::Role;
use larder::routes::auth::TokenResponse;
use larder::verify_access_token;

use crate::common::{assert_error, assert_error_code};
use crate::support::create_test_app;
use crate::support::factory::{seed_user, test_state, PASSWORD};

#[actix_web::test]
async fn login_returns_bearer_token_for_the_user() {
    let state = test_state().await;
    seed_user(&state, "alice", Role::User).await;
    let jwt = state.security.jwt.clone().expect("signing configured");
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "alice"), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: TokenResponse = test::read_body_json(resp).await;
    assert_eq!(body.token_type, "bearer");
    let claims = verify_access_token(&body.access_token, &jwt).expect("token verifies");
    assert_eq!(claims.sub, "alice");
}

#[actix_web::test]
async fn unknown_username_is_not_found() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "ghost"), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(
        resp,
        404,
        "USER_NOT_FOUND",
        "User with username 'ghost' not found.",
    )
    .await;
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() {
    let state = test_state().await;
    seed_user(&state, "alice", Role::User).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "alice"), ("password", "WrongPass1!")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(
        resp,
        401,
        "INVALID_PASSWORD",
        "The provided password is invalid.",
    )
    .await;
}

#[actix_web::test]
async fn form_without_password_is_bad_request() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "alice")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_code(resp, 400, "BAD_REQUEST").await;
}

// Allow-sets and ownership checks on mutating routes.

use actix_web::test;
use larder::auth::roles::Role;
use serde_json::{json, Value};

use crate::common::assert_error;
use crate::support::create_test_app;
use crate::support::factory::{bearer, seed_user, test_state};

const FORBIDDEN: &str = "You do not have permission to perform this action.";

#[actix_web::test]
async fn user_cannot_write_admin_only_categories() {
    let state = test_state().await;
    let bob = seed_user(&state, "bob", Role::User).await;
    let auth = bearer(&state, &bob);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/categories")
        .insert_header(auth)
        .set_json(json!({ "name": "Soups" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 403, "FORBIDDEN", FORBIDDEN).await;
}

#[actix_web::test]
async fn anonymous_caller_is_unauthorized_on_user_routes() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/stores")
        .set_json(json!({ "name": "Corner shop", "address": "1 Main St" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "UNAUTHORIZED", "Not authenticated").await;
}

#[actix_web::test]
async fn reads_are_public() {
    let app = create_test_app(test_state().await).build().await;

    for uri in ["/users", "/categories", "/ingredients", "/recipes", "/stores"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200, "GET {uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]), "GET {uri}");
    }
}

#[actix_web::test]
async fn users_cannot_edit_each_other_but_admins_can() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let mallory = seed_user(&state, "mallory", Role::User).await;
    let root = seed_user(&state, "root", Role::Admin).await;
    let as_mallory = bearer(&state, &mallory);
    let as_root = bearer(&state, &root);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(as_mallory)
        .set_json(json!({ "img": "0123456789abcdef0123456789abcdef.png" }))
        .to_request();
    assert_error(test::call_service(&app, req).await, 403, "FORBIDDEN", FORBIDDEN).await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(as_root)
        .set_json(json!({ "email": "alice@example.test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "alice@example.test");
}

use actix_web::test;
use larder::auth::roles::Role;
use larder::routes::auth::TokenResponse;
use serde_json::{json, Value};

use crate::common::{assert_error, assert_error_code};
use crate::support::create_test_app;
use crate::support::factory::{bearer, seed_user, test_state, PASSWORD};

#[actix_web::test]
async fn register_login_delete_scenario() {
    let app = create_test_app(test_state().await).build().await;

    let register = || {
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": "alice", "password": "StrongPass1!" }))
            .to_request()
    };

    let resp = test::call_service(&app, register()).await;
    assert_eq!(resp.status().as_u16(), 201);
    let user: Value = test::read_body_json(resp).await;
    let id = user["id"].as_i64().expect("id");
    assert_eq!(user["username"], "alice");
    assert_eq!(user["role"], "user");
    assert!(user.get("password_digest").is_none());

    let resp = test::call_service(&app, register()).await;
    assert_error(
        resp,
        409,
        "USER_EXISTS",
        "User with username 'alice' already exists.",
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "alice"), ("password", "StrongPass1!")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let token: TokenResponse = test::read_body_json(resp).await;
    let auth = ("Authorization", format!("Bearer {}", token.access_token));

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], format!("User with ID {id} has been deleted."));

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{id}"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error(
        resp,
        404,
        "USER_NOT_FOUND",
        &format!("User with ID {id} not found."),
    )
    .await;
}

#[actix_web::test]
async fn weak_password_names_first_missing_class() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "username": "bob", "password": "password!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(
        resp,
        422,
        "VALIDATION_ERROR",
        "Password must contain at least one digit.",
    )
    .await;
}

#[actix_web::test]
async fn get_user_by_id() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", alice.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "alice");

    let req = test::TestRequest::get().uri("/users/999").to_request();
    assert_error(
        test::call_service(&app, req).await,
        404,
        "USER_NOT_FOUND",
        "User with ID 999 not found.",
    )
    .await;
}

#[actix_web::test]
async fn change_own_password_then_log_in_with_it() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).build().await;
    let uri = format!("/users/{}", alice.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth.clone())
        .set_json(json!({ "old_password": "WrongPass1!", "new_password": "Fresher2@" }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        401,
        "INVALID_PASSWORD",
        "The provided password is invalid.",
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth.clone())
        .set_json(json!({ "new_password": "Fresher2@" }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "Current password is required.",
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth)
        .set_json(json!({ "old_password": PASSWORD, "new_password": "Fresher2@" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "alice"), ("password", "Fresher2@")])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);
}

#[actix_web::test]
async fn email_must_be_unique_across_users() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let bob = seed_user(&state, "bob", Role::User).await;
    let as_alice = bearer(&state, &alice);
    let as_bob = bearer(&state, &bob);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(as_alice)
        .set_json(json!({ "password": PASSWORD, "email": "shared@example.test" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", bob.id))
        .insert_header(as_bob)
        .set_json(json!({ "password": PASSWORD, "email": "shared@example.test" }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        409,
        "DUPLICATE_EMAIL",
        "Email 'shared@example.test' is already associated with another user.",
    )
    .await;
}

#[actix_web::test]
async fn user_cannot_delete_someone_else() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let bob = seed_user(&state, "bob", Role::User).await;
    let as_bob = bearer(&state, &bob);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(as_bob)
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        403,
        "FORBIDDEN",
        "You do not have permission to perform this action.",
    )
    .await;
}

#[actix_web::test]
async fn malformed_update_bodies_change_nothing() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).build().await;
    let uri = format!("/users/{}", alice.id);

    for body in [
        json!({ "email": 5, "password": PASSWORD }),
        json!({ "emial": "a@example.test", "password": PASSWORD }),
    ] {
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(auth.clone())
            .set_json(body)
            .to_request();
        assert_error_code(test::call_service(&app, req).await, 422, "VALIDATION_ERROR").await;
    }

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth.clone())
        .set_json(json!({}))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "No changes were supplied.",
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth)
        .set_json(json!({
            "old_password": PASSWORD,
            "new_password": "Fresher2@",
            "email": "alice@example.test",
        }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "Update either the password, the email or the images, one per request.",
    )
    .await;

    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["email"].is_null());

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "alice"), ("password", PASSWORD)])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);
}

#[actix_web::test]
async fn registration_checks_email_shape() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "username": "bob", "password": PASSWORD, "email": "not-an-email" }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "Email 'not-an-email' is not a valid email address.",
    )
    .await;

    // blank emails are stored as none, so they never collide
    for name in ["bob", "carol"] {
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": name, "password": PASSWORD, "email": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
        let user: Value = test::read_body_json(resp).await;
        assert!(user["email"].is_null());
    }

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "username": "dave", "password": PASSWORD, "email": " Dave@Example.test " }))
        .to_request();
    let user: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(user["email"], "Dave@Example.test");
}

#[actix_web::test]
async fn email_update_checks_shape() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).build().await;
    let uri = format!("/users/{}", alice.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth.clone())
        .set_json(json!({ "password": PASSWORD, "email": "not-an-email" }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "Email 'not-an-email' is not a valid email address.",
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(auth)
        .set_json(json!({ "password": PASSWORD, "email": "  " }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "Email must not be empty.",
    )
    .await;
}

#[actix_web::test]
async fn usernames_are_trimmed_before_uniqueness_check() {
    let state = test_state().await;
    seed_user(&state, "alice", Role::User).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "username": "alice ", "password": PASSWORD }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        409,
        "USER_EXISTS",
        "User with username 'alice' already exists.",
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "username": "  carol ", "password": PASSWORD }))
        .to_request();
    let user: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(user["username"], "carol");
}

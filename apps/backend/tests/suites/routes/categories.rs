use actix_web::test;
use larder::auth::roles::Role;
use serde_json::{json, Value};

use crate::common::assert_error;
use crate::support::create_test_app;
use crate::support::factory::{bearer, seed_user, test_state};

#[actix_web::test]
async fn admin_manages_categories() {
    let state = test_state().await;
    let root = seed_user(&state, "root", Role::Admin).await;
    let auth = bearer(&state, &root);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/categories")
        .insert_header(auth.clone())
        .set_json(json!({ "name": "Soups", "description": "Hot and wet" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().expect("id");

    let req = test::TestRequest::put()
        .uri(&format!("/categories/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "description": "Comforting" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Soups");
    assert_eq!(updated["description"], "Comforting");

    let req = test::TestRequest::delete()
        .uri(&format!("/categories/{id}"))
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["detail"], format!("Category with ID {id} has been deleted."));

    let req = test::TestRequest::get()
        .uri(&format!("/categories/{id}"))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        404,
        "CATEGORY_NOT_FOUND",
        &format!("Category with ID {id} not found."),
    )
    .await;
}

#[actix_web::test]
async fn duplicate_name_conflicts_and_keeps_original() {
    let state = test_state().await;
    let root = seed_user(&state, "root", Role::Admin).await;
    let auth = bearer(&state, &root);
    let app = create_test_app(state).build().await;

    let create = |description: &str| {
        test::TestRequest::post()
            .uri("/categories")
            .insert_header(auth.clone())
            .set_json(json!({ "name": "Soups", "description": description }))
            .to_request()
    };

    let first: Value = test::call_and_read_body_json(&app, create("original")).await;

    assert_error(
        test::call_service(&app, create("replacement")).await,
        409,
        "NAME_EXISTS",
        "Category with name 'Soups' already exists.",
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/categories/{}", first["id"]))
        .to_request();
    let stored: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored["description"], "original");

    let list: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/categories").to_request(),
    )
    .await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn renaming_onto_existing_name_conflicts() {
    let state = test_state().await;
    let root = seed_user(&state, "root", Role::Admin).await;
    let auth = bearer(&state, &root);
    let app = create_test_app(state).build().await;

    for name in ["Soups", "Salads"] {
        let req = test::TestRequest::post()
            .uri("/categories")
            .insert_header(auth.clone())
            .set_json(json!({ "name": name }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 201);
    }

    let req = test::TestRequest::put()
        .uri("/categories/2")
        .insert_header(auth)
        .set_json(json!({ "name": "Soups" }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        409,
        "NAME_EXISTS",
        "Category with name 'Soups' already exists.",
    )
    .await;
}

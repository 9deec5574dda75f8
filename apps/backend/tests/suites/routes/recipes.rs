use actix_web::test;
use larder::auth::roles::Role;
use serde_json::{json, Value};

use crate::common::assert_error;
use crate::support::create_test_app;
use crate::support::factory::{bearer, seed_user, test_state};

#[actix_web::test]
async fn recipe_is_owned_by_its_creator() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let bob = seed_user(&state, "bob", Role::User).await;
    let root = seed_user(&state, "root", Role::Admin).await;
    let as_alice = bearer(&state, &alice);
    let as_bob = bearer(&state, &bob);
    let as_root = bearer(&state, &root);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/recipes")
        .insert_header(as_alice.clone())
        .set_json(json!({ "name": "Tomato soup", "servings": 4, "cook_time_sec": 1200 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let recipe: Value = test::read_body_json(resp).await;
    let id = recipe["id"].as_i64().expect("id");
    assert_eq!(recipe["user_id"], alice.id);

    let req = test::TestRequest::put()
        .uri(&format!("/recipes/{id}"))
        .insert_header(as_bob)
        .set_json(json!({ "servings": 2 }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        403,
        "FORBIDDEN",
        "You do not have permission to perform this action.",
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/recipes/{id}"))
        .insert_header(as_root)
        .set_json(json!({ "servings": 6 }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["servings"], 6);
    assert_eq!(updated["name"], "Tomato soup");

    let req = test::TestRequest::get()
        .uri(&format!("/recipes/user/{}", alice.id))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/recipes/{id}"))
        .insert_header(as_alice)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["detail"], format!("Recipe with ID {id} has been deleted."));
}

#[actix_web::test]
async fn negative_times_are_rejected() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/recipes")
        .insert_header(auth)
        .set_json(json!({ "name": "Time travel", "prep_time_sec": -5 }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "prep_time_sec must be non-negative.",
    )
    .await;
}

#[actix_web::test]
async fn recipes_for_unknown_user_is_not_found() {
    let app = create_test_app(test_state().await).build().await;

    let req = test::TestRequest::get().uri("/recipes/user/42").to_request();
    assert_error(
        test::call_service(&app, req).await,
        404,
        "USER_NOT_FOUND",
        "User with ID 42 not found.",
    )
    .await;
}

#[actix_web::test]
async fn ingredient_amounts_and_categories() {
    let state = test_state().await;
    let root = seed_user(&state, "root", Role::Admin).await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let as_root = bearer(&state, &root);
    let as_alice = bearer(&state, &alice);
    let app = create_test_app(state).build().await;

    let post = |uri: &str, auth: &(actix_web::http::header::HeaderName, String), body: Value| {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(auth.clone())
            .set_json(body)
            .to_request()
    };

    let recipe: Value =
        test::call_and_read_body_json(&app, post("/recipes", &as_alice, json!({ "name": "Pesto" })))
            .await;
    let basil: Value = test::call_and_read_body_json(
        &app,
        post("/ingredients", &as_alice, json!({ "name": "Basil" })),
    )
    .await;
    let sauces: Value = test::call_and_read_body_json(
        &app,
        post("/categories", &as_root, json!({ "name": "Sauces" })),
    )
    .await;
    let (rid, iid, cid) = (&recipe["id"], &basil["id"], &sauces["id"]);

    let link_uri = format!("/recipes/{rid}/ingredients/{iid}");
    let req = test::TestRequest::put()
        .uri(&link_uri)
        .insert_header(as_alice.clone())
        .set_json(json!({ "amount_grams": 50.0, "amount_readable": "a big handful" }))
        .to_request();
    let link: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(link["amount_grams"], 50.0);

    let req = test::TestRequest::put()
        .uri(&link_uri)
        .insert_header(as_alice.clone())
        .set_json(json!({ "amount_grams": 60.0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/recipes/{rid}/ingredients"))
        .to_request();
    let entries: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(entries.as_array().map(Vec::len), Some(1));
    assert_eq!(entries[0]["ingredient"]["name"], "Basil");
    assert_eq!(entries[0]["amount_grams"], 60.0);

    let cat_uri = format!("/recipes/{rid}/categories/{cid}");
    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&cat_uri)
            .insert_header(as_alice.clone())
            .to_request();
        let category: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(category["name"], "Sauces");
    }
    let req = test::TestRequest::get()
        .uri(&format!("/recipes/{rid}/categories"))
        .to_request();
    let categories: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(categories.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&cat_uri)
        .insert_header(as_alice.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::delete()
        .uri(&link_uri)
        .insert_header(as_alice.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::delete()
        .uri(&link_uri)
        .insert_header(as_alice)
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        404,
        "RECIPE_INGREDIENT_NOT_FOUND",
        &format!("Ingredient with ID {iid} is not part of recipe with ID {rid}."),
    )
    .await;
}

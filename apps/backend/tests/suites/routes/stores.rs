use actix_web::test;
use larder::auth::roles::Role;
use serde_json::{json, Value};

use crate::common::assert_error;
use crate::support::create_test_app;
use crate::support::factory::{bearer, seed_user, test_state};

#[actix_web::test]
async fn store_crud_and_shelves() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/stores")
        .insert_header(auth.clone())
        .set_json(json!({
            "name": "Corner shop",
            "address": "1 Main St",
            "latitude": 51.5,
            "longitude": -0.12
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let store: Value = test::read_body_json(resp).await;
    let sid = store["id"].as_i64().expect("id");

    let req = test::TestRequest::post()
        .uri("/ingredients")
        .insert_header(auth.clone())
        .set_json(json!({ "name": "Flour" }))
        .to_request();
    let flour: Value = test::call_and_read_body_json(&app, req).await;
    let iid = flour["id"].as_i64().expect("id");

    let shelf_uri = format!("/stores/{sid}/shelves/{iid}");
    let req = test::TestRequest::put()
        .uri(&shelf_uri)
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": 12 }))
        .to_request();
    let shelf: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(shelf["quantity"], 12);

    let req = test::TestRequest::put()
        .uri(&shelf_uri)
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": -1 }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "Quantity must be non-negative.",
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/stores/{sid}/shelves"))
        .to_request();
    let shelves: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(shelves[0]["ingredient"]["name"], "Flour");
    assert_eq!(shelves[0]["quantity"], 12);

    let req = test::TestRequest::delete()
        .uri(&shelf_uri)
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::delete()
        .uri(&shelf_uri)
        .insert_header(auth.clone())
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        404,
        "SHELF_NOT_FOUND",
        &format!("Ingredient with ID {iid} is not stocked by store with ID {sid}."),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&format!("/stores/{sid}"))
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["detail"], format!("Store with ID {sid} has been deleted."));
}

#[actix_web::test]
async fn coordinates_are_range_checked() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/stores")
        .insert_header(auth)
        .set_json(json!({ "name": "Pole", "address": "North", "latitude": 91.0 }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "Latitude must be between -90 and 90.",
    )
    .await;
}

#[actix_web::test]
async fn store_requires_address() {
    let state = test_state().await;
    let alice = seed_user(&state, "alice", Role::User).await;
    let auth = bearer(&state, &alice);
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/stores")
        .insert_header(auth)
        .set_json(json!({ "name": "Nowhere" }))
        .to_request();
    assert_error(
        test::call_service(&app, req).await,
        422,
        "VALIDATION_ERROR",
        "missing field `address`",
    )
    .await;
}

// Insert-or-nothing outcomes at the adapter layer.

use larder::adapters::categories_sea::{self, CategoryCreate};
use larder::adapters::users_sea::{self, UserCreate};
use larder::adapters::InsertOutcome;
use backend_test_support::unique_helpers::unique_name;
use larder::db::require_db;

use crate::support::factory::test_state;

#[tokio::test]
async fn second_insert_of_same_name_is_conflict() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let name = unique_name("soups");
    let create = || CategoryCreate {
        name: name.clone(),
        description: None,
        img: None,
        preview_img: None,
    };

    let first = categories_sea::insert_category(db, create()).await.unwrap();
    let InsertOutcome::Created(model) = first else {
        panic!("first insert should create");
    };
    assert_eq!(model.name, name);

    let second = categories_sea::insert_category(db, create()).await.unwrap();
    assert!(matches!(second, InsertOutcome::Conflict));
    assert_eq!(categories_sea::list_all(db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn user_insert_conflicts_on_username() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();

    let username = unique_name("alice");
    let first = users_sea::insert_user(db, UserCreate::new(&username, "digest-1"))
        .await
        .unwrap()
        .created();
    assert!(first.is_some());

    let again = users_sea::insert_user(db, UserCreate::new(&username, "digest-2"))
        .await
        .unwrap();
    assert!(again.created().is_none());

    let stored = users_sea::find_by_username(db, &username)
        .await
        .unwrap()
        .expect("alice stored");
    assert_eq!(stored.password, "digest-1");
}

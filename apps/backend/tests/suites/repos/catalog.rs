use larder::auth::roles::Role;
use larder::db::require_db;
use larder::errors::domain::{DomainError, EntityKind};
use larder::repos::categories::{self, CategoryCreate, CategoryUpdate};
use larder::repos::ingredients::{self, IngredientCreate};
use larder::repos::recipes::{self, IngredientAmount, RecipeCreate};
use larder::repos::stores::{self, StoreCreate};
use larder::repos::Lookup;

use crate::support::factory::{seed_user, test_state};

fn category(name: &str) -> CategoryCreate {
    CategoryCreate {
        name: name.to_string(),
        description: None,
        img: None,
        preview_img: None,
    }
}

fn ingredient(name: &str) -> IngredientCreate {
    IngredientCreate {
        name: name.to_string(),
        description: None,
        recipe_id: None,
        img: None,
        preview_img: None,
    }
}

fn recipe(user_id: i64, name: &str) -> RecipeCreate {
    RecipeCreate {
        user_id,
        name: name.to_string(),
        cook_time_sec: None,
        prep_time_sec: None,
        non_blocking_time_sec: None,
        servings: None,
        description: None,
        img: None,
        preview_img: None,
    }
}

#[tokio::test]
async fn category_lookup_by_id_and_name() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let soups = categories::create(db, category("Soups")).await.unwrap();

    assert_eq!(categories::get(db, Lookup::Id(soups.id)).await.unwrap(), soups);
    assert_eq!(categories::get(db, "Soups".into()).await.unwrap(), soups);
    assert_eq!(
        categories::get(db, "Stews".into()).await.unwrap_err(),
        DomainError::NotFound(
            EntityKind::Category,
            "Category with name 'Stews' not found.".into()
        )
    );
}

#[tokio::test]
async fn duplicate_category_keeps_prior_record() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let first = categories::create(
        db,
        CategoryCreate {
            description: Some("first".into()),
            ..category("Soups")
        },
    )
    .await
    .unwrap();

    let err = categories::create(
        db,
        CategoryCreate {
            description: Some("second".into()),
            ..category("Soups")
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err, DomainError::name_exists(EntityKind::Category, "Soups"));

    let stored = categories::get(db, first.id.into()).await.unwrap();
    assert_eq!(stored.description.as_deref(), Some("first"));
}

#[tokio::test]
async fn partial_update_leaves_other_columns() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let soups = categories::create(
        db,
        CategoryCreate {
            description: Some("hot".into()),
            ..category("Soups")
        },
    )
    .await
    .unwrap();

    let renamed = categories::update(
        db,
        soups.id,
        CategoryUpdate {
            name: Some("Broths".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(renamed.name, "Broths");
    assert_eq!(renamed.description.as_deref(), Some("hot"));
}

#[tokio::test]
async fn ingredient_may_point_at_existing_recipe_only() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let alice = seed_user(&state, "alice", Role::User).await;
    let pesto = recipes::create(db, recipe(alice.id, "Pesto")).await.unwrap();

    let sauce = ingredients::create(
        db,
        IngredientCreate {
            recipe_id: Some(pesto.id),
            ..ingredient("Pesto sauce")
        },
    )
    .await
    .unwrap();
    assert_eq!(sauce.recipe_id, Some(pesto.id));

    let err = ingredients::create(
        db,
        IngredientCreate {
            recipe_id: Some(999),
            ..ingredient("Ghost sauce")
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(EntityKind::Recipe, _)));
}

#[tokio::test]
async fn recipe_for_missing_user_is_rejected() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();

    let err = recipes::create(db, recipe(77, "Orphan")).await.unwrap_err();
    assert_eq!(err, DomainError::not_found_id(EntityKind::User, 77));
}

#[tokio::test]
async fn ingredient_amount_upserts() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let alice = seed_user(&state, "alice", Role::User).await;
    let pesto = recipes::create(db, recipe(alice.id, "Pesto")).await.unwrap();
    let basil = ingredients::create(db, ingredient("Basil")).await.unwrap();

    recipes::set_ingredient(
        db,
        pesto.id,
        basil.id,
        IngredientAmount {
            amount_grams: Some(30.0),
            amount_readable: None,
        },
    )
    .await
    .unwrap();
    let link = recipes::set_ingredient(
        db,
        pesto.id,
        basil.id,
        IngredientAmount {
            amount_grams: Some(45.0),
            amount_readable: Some("a handful".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(link.amount_grams, Some(45.0));

    let entries = recipes::list_ingredients(db, pesto.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ingredient.id, basil.id);
    assert_eq!(entries[0].amount_readable.as_deref(), Some("a handful"));

    let err = recipes::set_ingredient(
        db,
        pesto.id,
        basil.id,
        IngredientAmount {
            amount_grams: Some(-1.0),
            amount_readable: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        DomainError::validation("amount_grams must be non-negative.")
    );
}

#[tokio::test]
async fn category_links_are_idempotent() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let alice = seed_user(&state, "alice", Role::User).await;
    let pesto = recipes::create(db, recipe(alice.id, "Pesto")).await.unwrap();
    let sauces = categories::create(db, category("Sauces")).await.unwrap();

    recipes::add_category(db, pesto.id, sauces.id).await.unwrap();
    recipes::add_category(db, pesto.id, sauces.id).await.unwrap();
    assert_eq!(
        recipes::list_categories(db, pesto.id).await.unwrap(),
        vec![sauces.clone()]
    );

    recipes::remove_category(db, pesto.id, sauces.id).await.unwrap();
    let err = recipes::remove_category(db, pesto.id, sauces.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(EntityKind::RecipeCategory, _)));
}

#[tokio::test]
async fn shelves_track_quantity_per_store() {
    let state = test_state().await;
    let db = require_db(&state).unwrap();
    let shop = stores::create(
        db,
        StoreCreate {
            name: "Corner shop".into(),
            address: "1 Main St".into(),
            longitude: None,
            latitude: None,
            phone: None,
            website: None,
            description: None,
            img: None,
            preview_img: None,
        },
    )
    .await
    .unwrap();
    let flour = ingredients::create(db, ingredient("Flour")).await.unwrap();

    stores::set_shelf(db, shop.id, flour.id, 3).await.unwrap();
    let shelf = stores::set_shelf(db, shop.id, flour.id, 0).await.unwrap();
    assert_eq!(shelf.quantity, 0);

    let entries = stores::list_shelves(db, shop.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ingredient.name, "Flour");

    let err = stores::set_shelf(db, shop.id, 999, 1).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(EntityKind::Ingredient, _)));
}

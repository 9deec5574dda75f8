//! Recipe repository functions, including ingredient amounts and category links.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use super::categories::Category;
use super::ingredients::Ingredient;
use super::Lookup;
use crate::adapters::recipes_sea as recipes_adapter;
pub use crate::adapters::recipes_sea::{IngredientAmount, RecipeCreate, RecipeUpdate};
use crate::adapters::{categories_sea, ingredients_sea, users_sea, InsertOutcome};
use crate::entities::{recipe_ingredients, recipes};
use crate::errors::domain::{DomainError, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub cook_time_sec: Option<i32>,
    pub prep_time_sec: Option<i32>,
    pub non_blocking_time_sec: Option<i32>,
    pub servings: Option<i32>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<recipes::Model> for Recipe {
    fn from(model: recipes::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            cook_time_sec: model.cook_time_sec,
            prep_time_sec: model.prep_time_sec,
            non_blocking_time_sec: model.non_blocking_time_sec,
            servings: model.servings,
            description: model.description,
            img: model.img,
            preview_img: model.preview_img,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Link row between a recipe and an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub amount_grams: Option<f64>,
    pub amount_readable: Option<String>,
}

impl From<recipe_ingredients::Model> for RecipeIngredient {
    fn from(model: recipe_ingredients::Model) -> Self {
        Self {
            recipe_id: model.recipe_id,
            ingredient_id: model.ingredient_id,
            amount_grams: model.amount_grams,
            amount_readable: model.amount_readable,
        }
    }
}

/// An ingredient of a recipe together with the amount used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredientEntry {
    pub ingredient: Ingredient,
    pub amount_grams: Option<f64>,
    pub amount_readable: Option<String>,
}

fn non_negative(field: &str, value: Option<i32>) -> Result<(), DomainError> {
    match value {
        Some(v) if v < 0 => Err(DomainError::validation(format!(
            "{field} must be non-negative."
        ))),
        _ => Ok(()),
    }
}

fn validate_times(
    cook_time_sec: Option<i32>,
    prep_time_sec: Option<i32>,
    non_blocking_time_sec: Option<i32>,
    servings: Option<i32>,
) -> Result<(), DomainError> {
    non_negative("cook_time_sec", cook_time_sec)?;
    non_negative("prep_time_sec", prep_time_sec)?;
    non_negative("non_blocking_time_sec", non_blocking_time_sec)?;
    non_negative("servings", servings)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lookup: Lookup,
) -> Result<Recipe, DomainError> {
    let found = match &lookup {
        Lookup::Id(id) => recipes_adapter::find_by_id(conn, *id).await?,
        Lookup::Name(name) => recipes_adapter::find_by_name(conn, name).await?,
    };
    found.map(Recipe::from).ok_or_else(|| match lookup {
        Lookup::Id(id) => DomainError::not_found_id(EntityKind::Recipe, id),
        Lookup::Name(name) => DomainError::not_found_name(EntityKind::Recipe, &name),
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Recipe>, DomainError> {
    let rows = recipes_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

/// Recipes owned by `user_id`; `NotFound(User)` when the user does not exist.
pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Recipe>, DomainError> {
    if users_sea::find_by_id(conn, user_id).await?.is_none() {
        return Err(DomainError::not_found_id(EntityKind::User, user_id));
    }
    let rows = recipes_adapter::list_by_user(conn, user_id).await?;
    Ok(rows.into_iter().map(Recipe::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RecipeCreate,
) -> Result<Recipe, DomainError> {
    validate_times(
        dto.cook_time_sec,
        dto.prep_time_sec,
        dto.non_blocking_time_sec,
        dto.servings,
    )?;
    if recipes_adapter::find_by_name(conn, &dto.name).await?.is_some() {
        return Err(DomainError::name_exists(EntityKind::Recipe, &dto.name));
    }
    if users_sea::find_by_id(conn, dto.user_id).await?.is_none() {
        return Err(DomainError::not_found_id(EntityKind::User, dto.user_id));
    }
    let name = dto.name.clone();
    match recipes_adapter::insert_recipe(conn, dto).await? {
        InsertOutcome::Created(model) => Ok(Recipe::from(model)),
        InsertOutcome::Conflict => Err(DomainError::name_exists(EntityKind::Recipe, &name)),
    }
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: RecipeUpdate,
) -> Result<Recipe, DomainError> {
    let existing = require(conn, id).await?;
    if let Some(name) = dto.name.as_deref() {
        if recipes_adapter::find_name_taken(conn, name, id).await?.is_some() {
            return Err(DomainError::name_exists(EntityKind::Recipe, name));
        }
    }
    validate_times(
        dto.cook_time_sec,
        dto.prep_time_sec,
        dto.non_blocking_time_sec,
        dto.servings,
    )?;
    let model = recipes_adapter::update_recipe(conn, existing, dto).await?;
    Ok(Recipe::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: i64) -> Result<(), DomainError> {
    match recipes_adapter::delete_recipe(conn, id).await? {
        0 => Err(DomainError::not_found_id(EntityKind::Recipe, id)),
        _ => Ok(()),
    }
}

/// Add an ingredient to a recipe or replace its amount.
pub async fn set_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    ingredient_id: i64,
    amount: IngredientAmount,
) -> Result<RecipeIngredient, DomainError> {
    require(conn, recipe_id).await?;
    if ingredients_sea::find_by_id(conn, ingredient_id).await?.is_none() {
        return Err(DomainError::not_found_id(EntityKind::Ingredient, ingredient_id));
    }
    if matches!(amount.amount_grams, Some(g) if g.is_nan() || g < 0.0) {
        return Err(DomainError::validation("amount_grams must be non-negative."));
    }
    let model =
        recipes_adapter::upsert_recipe_ingredient(conn, recipe_id, ingredient_id, amount).await?;
    Ok(RecipeIngredient::from(model))
}

pub async fn remove_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    ingredient_id: i64,
) -> Result<(), DomainError> {
    require(conn, recipe_id).await?;
    match recipes_adapter::delete_recipe_ingredient(conn, recipe_id, ingredient_id).await? {
        0 => Err(DomainError::not_found(
            EntityKind::RecipeIngredient,
            format!("Ingredient with ID {ingredient_id} is not part of recipe with ID {recipe_id}."),
        )),
        _ => Ok(()),
    }
}

pub async fn list_ingredients<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
) -> Result<Vec<RecipeIngredientEntry>, DomainError> {
    require(conn, recipe_id).await?;
    let rows = recipes_adapter::list_recipe_ingredients(conn, recipe_id).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(link, ingredient)| {
            ingredient.map(|i| RecipeIngredientEntry {
                ingredient: Ingredient::from(i),
                amount_grams: link.amount_grams,
                amount_readable: link.amount_readable,
            })
        })
        .collect())
}

/// Tag a recipe with a category. Re-adding an existing tag is a no-op.
pub async fn add_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    category_id: i64,
) -> Result<Category, DomainError> {
    require(conn, recipe_id).await?;
    let category = categories_sea::find_by_id(conn, category_id)
        .await?
        .ok_or_else(|| DomainError::not_found_id(EntityKind::Category, category_id))?;
    recipes_adapter::insert_recipe_category(conn, recipe_id, category_id).await?;
    Ok(Category::from(category))
}

pub async fn remove_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
    category_id: i64,
) -> Result<(), DomainError> {
    require(conn, recipe_id).await?;
    match recipes_adapter::delete_recipe_category(conn, recipe_id, category_id).await? {
        0 => Err(DomainError::not_found(
            EntityKind::RecipeCategory,
            format!("Category with ID {category_id} is not assigned to recipe with ID {recipe_id}."),
        )),
        _ => Ok(()),
    }
}

pub async fn list_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
) -> Result<Vec<Category>, DomainError> {
    require(conn, recipe_id).await?;
    let rows = recipes_adapter::list_recipe_categories(conn, recipe_id).await?;
    Ok(rows.into_iter().map(Category::from).collect())
}

async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<recipes::Model, DomainError> {
    recipes_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found_id(EntityKind::Recipe, id))
}

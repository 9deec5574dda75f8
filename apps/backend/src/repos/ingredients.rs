//! Ingredient repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use super::Lookup;
use crate::adapters::ingredients_sea as ingredients_adapter;
pub use crate::adapters::ingredients_sea::{IngredientCreate, IngredientUpdate};
use crate::adapters::{recipes_sea, InsertOutcome};
use crate::entities::ingredients;
use crate::errors::domain::{DomainError, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub recipe_id: Option<i64>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            recipe_id: model.recipe_id,
            img: model.img,
            preview_img: model.preview_img,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lookup: Lookup,
) -> Result<Ingredient, DomainError> {
    let found = match &lookup {
        Lookup::Id(id) => ingredients_adapter::find_by_id(conn, *id).await?,
        Lookup::Name(name) => ingredients_adapter::find_by_name(conn, name).await?,
    };
    found.map(Ingredient::from).ok_or_else(|| match lookup {
        Lookup::Id(id) => DomainError::not_found_id(EntityKind::Ingredient, id),
        Lookup::Name(name) => DomainError::not_found_name(EntityKind::Ingredient, &name),
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Ingredient>, DomainError> {
    let rows = ingredients_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Ingredient::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: IngredientCreate,
) -> Result<Ingredient, DomainError> {
    if ingredients_adapter::find_by_name(conn, &dto.name).await?.is_some() {
        return Err(DomainError::name_exists(EntityKind::Ingredient, &dto.name));
    }
    if let Some(recipe_id) = dto.recipe_id {
        ensure_recipe(conn, recipe_id).await?;
    }
    let name = dto.name.clone();
    match ingredients_adapter::insert_ingredient(conn, dto).await? {
        InsertOutcome::Created(model) => Ok(Ingredient::from(model)),
        InsertOutcome::Conflict => Err(DomainError::name_exists(EntityKind::Ingredient, &name)),
    }
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: IngredientUpdate,
) -> Result<Ingredient, DomainError> {
    let existing = ingredients_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found_id(EntityKind::Ingredient, id))?;
    if let Some(name) = dto.name.as_deref() {
        if ingredients_adapter::find_name_taken(conn, name, id).await?.is_some() {
            return Err(DomainError::name_exists(EntityKind::Ingredient, name));
        }
    }
    if let Some(recipe_id) = dto.recipe_id {
        ensure_recipe(conn, recipe_id).await?;
    }
    let model = ingredients_adapter::update_ingredient(conn, existing, dto).await?;
    Ok(Ingredient::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: i64) -> Result<(), DomainError> {
    match ingredients_adapter::delete_ingredient(conn, id).await? {
        0 => Err(DomainError::not_found_id(EntityKind::Ingredient, id)),
        _ => Ok(()),
    }
}

async fn ensure_recipe<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipe_id: i64,
) -> Result<(), DomainError> {
    recipes_sea::find_by_id(conn, recipe_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| DomainError::not_found_id(EntityKind::Recipe, recipe_id))
}

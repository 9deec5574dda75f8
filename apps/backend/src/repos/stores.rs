//! Store repository functions, including the shelves a store stocks.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use super::ingredients::Ingredient;
use super::Lookup;
use crate::adapters::stores_sea as stores_adapter;
pub use crate::adapters::stores_sea::{StoreCreate, StoreUpdate};
use crate::adapters::{ingredients_sea, InsertOutcome};
use crate::entities::{shelves, stores};
use crate::errors::domain::{DomainError, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<stores::Model> for Store {
    fn from(model: stores::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            longitude: model.longitude,
            latitude: model.latitude,
            phone: model.phone,
            website: model.website,
            description: model.description,
            img: model.img,
            preview_img: model.preview_img,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Quantity of one ingredient stocked by one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shelf {
    pub store_id: i64,
    pub ingredient_id: i64,
    pub quantity: i32,
}

impl From<shelves::Model> for Shelf {
    fn from(model: shelves::Model) -> Self {
        Self {
            store_id: model.store_id,
            ingredient_id: model.ingredient_id,
            quantity: model.quantity,
        }
    }
}

/// A shelf joined with the ingredient it holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfEntry {
    pub ingredient: Ingredient,
    pub quantity: i32,
}

fn validate_coordinates(longitude: Option<f64>, latitude: Option<f64>) -> Result<(), DomainError> {
    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::validation(
                "Longitude must be between -180 and 180.",
            ));
        }
    }
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::validation("Latitude must be between -90 and 90."));
        }
    }
    Ok(())
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lookup: Lookup,
) -> Result<Store, DomainError> {
    let found = match &lookup {
        Lookup::Id(id) => stores_adapter::find_by_id(conn, *id).await?,
        Lookup::Name(name) => stores_adapter::find_by_name(conn, name).await?,
    };
    found.map(Store::from).ok_or_else(|| match lookup {
        Lookup::Id(id) => DomainError::not_found_id(EntityKind::Store, id),
        Lookup::Name(name) => DomainError::not_found_name(EntityKind::Store, &name),
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Store>, DomainError> {
    let rows = stores_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Store::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StoreCreate,
) -> Result<Store, DomainError> {
    validate_coordinates(dto.longitude, dto.latitude)?;
    if stores_adapter::find_by_name(conn, &dto.name).await?.is_some() {
        return Err(DomainError::name_exists(EntityKind::Store, &dto.name));
    }
    let name = dto.name.clone();
    match stores_adapter::insert_store(conn, dto).await? {
        InsertOutcome::Created(model) => Ok(Store::from(model)),
        InsertOutcome::Conflict => Err(DomainError::name_exists(EntityKind::Store, &name)),
    }
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: StoreUpdate,
) -> Result<Store, DomainError> {
    let existing = require(conn, id).await?;
    if let Some(name) = dto.name.as_deref() {
        if stores_adapter::find_name_taken(conn, name, id).await?.is_some() {
            return Err(DomainError::name_exists(EntityKind::Store, name));
        }
    }
    validate_coordinates(dto.longitude, dto.latitude)?;
    let model = stores_adapter::update_store(conn, existing, dto).await?;
    Ok(Store::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: i64) -> Result<(), DomainError> {
    match stores_adapter::delete_store(conn, id).await? {
        0 => Err(DomainError::not_found_id(EntityKind::Store, id)),
        _ => Ok(()),
    }
}

/// Stock `quantity` of an ingredient, replacing any previous quantity.
pub async fn set_shelf<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    store_id: i64,
    ingredient_id: i64,
    quantity: i32,
) -> Result<Shelf, DomainError> {
    require(conn, store_id).await?;
    require_ingredient(conn, ingredient_id).await?;
    if quantity < 0 {
        return Err(DomainError::validation("Quantity must be non-negative."));
    }
    let model = stores_adapter::upsert_shelf(conn, store_id, ingredient_id, quantity).await?;
    Ok(Shelf::from(model))
}

pub async fn remove_shelf<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    store_id: i64,
    ingredient_id: i64,
) -> Result<(), DomainError> {
    require(conn, store_id).await?;
    match stores_adapter::delete_shelf(conn, store_id, ingredient_id).await? {
        0 => Err(DomainError::not_found(
            EntityKind::Shelf,
            format!("Ingredient with ID {ingredient_id} is not stocked by store with ID {store_id}."),
        )),
        _ => Ok(()),
    }
}

pub async fn list_shelves<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    store_id: i64,
) -> Result<Vec<ShelfEntry>, DomainError> {
    require(conn, store_id).await?;
    let rows = stores_adapter::list_shelves(conn, store_id).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(shelf, ingredient)| {
            ingredient.map(|i| ShelfEntry {
                ingredient: Ingredient::from(i),
                quantity: shelf.quantity,
            })
        })
        .collect())
}

async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<stores::Model, DomainError> {
    stores_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found_id(EntityKind::Store, id))
}

async fn require_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    ingredients_sea::find_by_id(conn, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| DomainError::not_found_id(EntityKind::Ingredient, id))
}

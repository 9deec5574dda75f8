//! Category repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use super::Lookup;
use crate::adapters::categories_sea as categories_adapter;
pub use crate::adapters::categories_sea::{CategoryCreate, CategoryUpdate};
use crate::adapters::InsertOutcome;
use crate::entities::categories;
use crate::errors::domain::{DomainError, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
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
) -> Result<Category, DomainError> {
    let found = match &lookup {
        Lookup::Id(id) => categories_adapter::find_by_id(conn, *id).await?,
        Lookup::Name(name) => categories_adapter::find_by_name(conn, name).await?,
    };
    found.map(Category::from).ok_or_else(|| match lookup {
        Lookup::Id(id) => DomainError::not_found_id(EntityKind::Category, id),
        Lookup::Name(name) => DomainError::not_found_name(EntityKind::Category, &name),
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Category>, DomainError> {
    let rows = categories_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Category::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CategoryCreate,
) -> Result<Category, DomainError> {
    if categories_adapter::find_by_name(conn, &dto.name).await?.is_some() {
        return Err(DomainError::name_exists(EntityKind::Category, &dto.name));
    }
    let name = dto.name.clone();
    match categories_adapter::insert_category(conn, dto).await? {
        InsertOutcome::Created(model) => Ok(Category::from(model)),
        InsertOutcome::Conflict => Err(DomainError::name_exists(EntityKind::Category, &name)),
    }
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: CategoryUpdate,
) -> Result<Category, DomainError> {
    let existing = categories_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found_id(EntityKind::Category, id))?;
    if let Some(name) = dto.name.as_deref() {
        if categories_adapter::find_name_taken(conn, name, id).await?.is_some() {
            return Err(DomainError::name_exists(EntityKind::Category, name));
        }
    }
    let model = categories_adapter::update_category(conn, existing, dto).await?;
    Ok(Category::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: i64) -> Result<(), DomainError> {
    match categories_adapter::delete_category(conn, id).await? {
        0 => Err(DomainError::not_found_id(EntityKind::Category, id)),
        _ => Ok(()),
    }
}

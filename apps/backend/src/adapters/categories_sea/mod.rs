//! SeaORM adapter for categories.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::InsertOutcome;
use crate::entities::categories;

pub mod dto;

pub use dto::{CategoryCreate, CategoryUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(conn)
        .await
}

/// A category other than `id` already using `name`.
pub async fn find_name_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    id: i64,
) -> Result<Option<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .filter(categories::Column::Id.ne(id))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::Id)
        .all(conn)
        .await
}

pub async fn insert_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CategoryCreate,
) -> Result<InsertOutcome<categories::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let name = dto.name.clone();
    let active = categories::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        img: Set(dto.img),
        preview_img: Set(dto.preview_img),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = categories::Entity::insert(active)
        .on_conflict(
            OnConflict::column(categories::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    if rows != 1 {
        return Ok(InsertOutcome::Conflict);
    }
    let category = find_by_name(conn, &name).await?.ok_or_else(|| {
        sea_orm::DbErr::RecordNotFound("categories.name not found".to_string())
    })?;
    Ok(InsertOutcome::Created(category))
}

pub async fn update_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: categories::Model,
    dto: CategoryUpdate,
) -> Result<categories::Model, sea_orm::DbErr> {
    let mut category: categories::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        category.name = Set(name);
    }
    if let Some(description) = dto.description {
        category.description = Set(Some(description));
    }
    if let Some(img) = dto.img {
        category.img = Set(Some(img));
    }
    if let Some(preview) = dto.preview_img {
        category.preview_img = Set(Some(preview));
    }
    category.updated_at = Set(time::OffsetDateTime::now_utc());
    category.update(conn).await
}

pub async fn delete_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = categories::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

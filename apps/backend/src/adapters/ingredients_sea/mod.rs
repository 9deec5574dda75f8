//! SeaORM adapter for ingredients.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::InsertOutcome;
use crate::entities::ingredients;

pub mod dto;

pub use dto::{IngredientCreate, IngredientUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<ingredients::Model>, sea_orm::DbErr> {
    ingredients::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<ingredients::Model>, sea_orm::DbErr> {
    ingredients::Entity::find()
        .filter(ingredients::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn find_name_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    id: i64,
) -> Result<Option<ingredients::Model>, sea_orm::DbErr> {
    ingredients::Entity::find()
        .filter(ingredients::Column::Name.eq(name))
        .filter(ingredients::Column::Id.ne(id))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<ingredients::Model>, sea_orm::DbErr> {
    ingredients::Entity::find()
        .order_by_asc(ingredients::Column::Id)
        .all(conn)
        .await
}

pub async fn insert_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: IngredientCreate,
) -> Result<InsertOutcome<ingredients::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let name = dto.name.clone();
    let active = ingredients::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        recipe_id: Set(dto.recipe_id),
        img: Set(dto.img),
        preview_img: Set(dto.preview_img),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = ingredients::Entity::insert(active)
        .on_conflict(
            OnConflict::column(ingredients::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    if rows != 1 {
        return Ok(InsertOutcome::Conflict);
    }
    let ingredient = find_by_name(conn, &name).await?.ok_or_else(|| {
        sea_orm::DbErr::RecordNotFound("ingredients.name not found".to_string())
    })?;
    Ok(InsertOutcome::Created(ingredient))
}

pub async fn update_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: ingredients::Model,
    dto: IngredientUpdate,
) -> Result<ingredients::Model, sea_orm::DbErr> {
    let mut ingredient: ingredients::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        ingredient.name = Set(name);
    }
    if let Some(description) = dto.description {
        ingredient.description = Set(Some(description));
    }
    if let Some(recipe_id) = dto.recipe_id {
        ingredient.recipe_id = Set(Some(recipe_id));
    }
    if let Some(img) = dto.img {
        ingredient.img = Set(Some(img));
    }
    if let Some(preview) = dto.preview_img {
        ingredient.preview_img = Set(Some(preview));
    }
    ingredient.updated_at = Set(time::OffsetDateTime::now_utc());
    ingredient.update(conn).await
}

pub async fn delete_ingredient<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = ingredients::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

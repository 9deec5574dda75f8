//! SeaORM adapter for stores and their shelves.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::InsertOutcome;
use crate::entities::{ingredients, shelves, stores};

pub mod dto;

pub use dto::{StoreCreate, StoreUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<stores::Model>, sea_orm::DbErr> {
    stores::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<stores::Model>, sea_orm::DbErr> {
    stores::Entity::find()
        .filter(stores::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn find_name_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    id: i64,
) -> Result<Option<stores::Model>, sea_orm::DbErr> {
    stores::Entity::find()
        .filter(stores::Column::Name.eq(name))
        .filter(stores::Column::Id.ne(id))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<stores::Model>, sea_orm::DbErr> {
    stores::Entity::find()
        .order_by_asc(stores::Column::Id)
        .all(conn)
        .await
}

pub async fn insert_store<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StoreCreate,
) -> Result<InsertOutcome<stores::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let name = dto.name.clone();
    let active = stores::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        address: Set(dto.address),
        longitude: Set(dto.longitude),
        latitude: Set(dto.latitude),
        phone: Set(dto.phone),
        website: Set(dto.website),
        description: Set(dto.description),
        img: Set(dto.img),
        preview_img: Set(dto.preview_img),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = stores::Entity::insert(active)
        .on_conflict(
            OnConflict::column(stores::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    if rows != 1 {
        return Ok(InsertOutcome::Conflict);
    }
    let store = find_by_name(conn, &name)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("stores.name not found".to_string()))?;
    Ok(InsertOutcome::Created(store))
}

pub async fn update_store<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: stores::Model,
    dto: StoreUpdate,
) -> Result<stores::Model, sea_orm::DbErr> {
    let mut store: stores::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        store.name = Set(name);
    }
    if let Some(address) = dto.address {
        store.address = Set(address);
    }
    if let Some(v) = dto.longitude {
        store.longitude = Set(Some(v));
    }
    if let Some(v) = dto.latitude {
        store.latitude = Set(Some(v));
    }
    if let Some(phone) = dto.phone {
        store.phone = Set(Some(phone));
    }
    if let Some(website) = dto.website {
        store.website = Set(Some(website));
    }
    if let Some(description) = dto.description {
        store.description = Set(Some(description));
    }
    if let Some(img) = dto.img {
        store.img = Set(Some(img));
    }
    if let Some(preview) = dto.preview_img {
        store.preview_img = Set(Some(preview));
    }
    store.updated_at = Set(time::OffsetDateTime::now_utc());
    store.update(conn).await
}

pub async fn delete_store<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = stores::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

/// Insert or overwrite the stocked quantity of an ingredient.
pub async fn upsert_shelf<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    store_id: i64,
    ingredient_id: i64,
    quantity: i32,
) -> Result<shelves::Model, sea_orm::DbErr> {
    let active = shelves::ActiveModel {
        store_id: Set(store_id),
        ingredient_id: Set(ingredient_id),
        quantity: Set(quantity),
    };

    shelves::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([shelves::Column::StoreId, shelves::Column::IngredientId])
                .update_column(shelves::Column::Quantity)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    shelves::Entity::find_by_id((store_id, ingredient_id))
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("shelves row not found".to_string()))
}

pub async fn delete_shelf<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    store_id: i64,
    ingredient_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = shelves::Entity::delete_by_id((store_id, ingredient_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn list_shelves<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    store_id: i64,
) -> Result<Vec<(shelves::Model, Option<ingredients::Model>)>, sea_orm::DbErr> {
    shelves::Entity::find()
        .filter(shelves::Column::StoreId.eq(store_id))
        .order_by_asc(shelves::Column::IngredientId)
        .find_also_related(ingredients::Entity)
        .all(conn)
        .await
}

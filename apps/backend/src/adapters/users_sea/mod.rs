//! SeaORM adapter for users.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::InsertOutcome;
use crate::entities::users;

pub mod dto;

pub use dto::{UserCreate, UserUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

/// Insert unless the username is taken.
pub async fn insert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<InsertOutcome<users::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let username = dto.username.clone();
    let user_active = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        email: Set(dto.email),
        password: Set(dto.password_digest),
        role: Set(dto.role),
        img: Set(None),
        preview_img: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = users::Entity::insert(user_active)
        .on_conflict(
            OnConflict::column(users::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    if rows != 1 {
        return Ok(InsertOutcome::Conflict);
    }
    let user = find_by_username(conn, &username)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users.username not found".to_string()))?;
    Ok(InsertOutcome::Created(user))
}

pub async fn update_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: users::Model,
    dto: UserUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    let mut user: users::ActiveModel = existing.into();
    if let Some(email) = dto.email {
        user.email = Set(Some(email));
    }
    if let Some(digest) = dto.password_digest {
        user.password = Set(digest);
    }
    if let Some(img) = dto.img {
        user.img = Set(Some(img));
    }
    if let Some(preview) = dto.preview_img {
        user.preview_img = Set(Some(preview));
    }
    user.updated_at = Set(time::OffsetDateTime::now_utc());
    user.update(conn).await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = users::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

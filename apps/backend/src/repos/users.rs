//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use super::Lookup;
use crate::adapters::users_sea::{self as users_adapter, UserCreate, UserUpdate};
use crate::adapters::InsertOutcome;
use crate::auth::roles::Role;
use crate::entities::users;
use crate::errors::domain::{DomainError, EntityKind};
use crate::logging::pii::Redacted;

/// User domain model. The password digest never leaves the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub role: Role,
    pub img: Option<String>,
    pub preview_img: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_digest: model.password,
            role: Role::resolve(Some(&model.role)),
            img: model.img,
            preview_img: model.preview_img,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields for a new user; `password_digest` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_digest: String,
    pub role: Role,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_id(conn, id).await?.map(User::from))
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_username(conn, username)
        .await?
        .map(User::from))
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lookup: Lookup,
) -> Result<User, DomainError> {
    match lookup {
        Lookup::Id(id) => find_by_id(conn, id)
            .await?
            .ok_or_else(|| DomainError::not_found_id(EntityKind::User, id)),
        Lookup::Name(username) => find_by_username(conn, &username).await?.ok_or_else(|| {
            DomainError::not_found(
                EntityKind::User,
                format!("User with username '{username}' not found."),
            )
        }),
    }
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<User>, DomainError> {
    let rows = users_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(User::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
) -> Result<User, DomainError> {
    if users_adapter::find_by_username(conn, &new_user.username)
        .await?
        .is_some()
    {
        warn!(username = %new_user.username, "username already registered");
        return Err(DomainError::username_exists(&new_user.username));
    }
    if let Some(email) = new_user.email.as_deref() {
        ensure_email_free(conn, email, None).await?;
    }

    let dto = UserCreate::new(new_user.username.clone(), new_user.password_digest)
        .with_email(new_user.email)
        .with_role(new_user.role.as_str());
    match users_adapter::insert_user(conn, dto).await? {
        InsertOutcome::Created(model) => Ok(User::from(model)),
        InsertOutcome::Conflict => Err(DomainError::username_exists(&new_user.username)),
    }
}

pub async fn update_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    password_digest: String,
) -> Result<User, DomainError> {
    let existing = require(conn, id).await?;
    let dto = UserUpdate {
        password_digest: Some(password_digest),
        ..Default::default()
    };
    Ok(User::from(users_adapter::update_user(conn, existing, dto).await?))
}

pub async fn update_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    email: String,
) -> Result<User, DomainError> {
    let existing = require(conn, id).await?;
    ensure_email_free(conn, &email, Some(id)).await?;
    let dto = UserUpdate {
        email: Some(email),
        ..Default::default()
    };
    Ok(User::from(users_adapter::update_user(conn, existing, dto).await?))
}

pub async fn update_images<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    img: Option<String>,
    preview_img: Option<String>,
) -> Result<User, DomainError> {
    let existing = require(conn, id).await?;
    let dto = UserUpdate {
        img,
        preview_img,
        ..Default::default()
    };
    Ok(User::from(users_adapter::update_user(conn, existing, dto).await?))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: i64) -> Result<(), DomainError> {
    match users_adapter::delete_user(conn, id).await? {
        0 => Err(DomainError::not_found_id(EntityKind::User, id)),
        _ => Ok(()),
    }
}

async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<users::Model, DomainError> {
    users_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found_id(EntityKind::User, id))
}

/// `DuplicateEmail` when a user other than `owner` already has `email`.
async fn ensure_email_free<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    owner: Option<i64>,
) -> Result<(), DomainError> {
    match users_adapter::find_by_email(conn, email).await? {
        Some(other) if Some(other.id) != owner => {
            warn!(email = %Redacted(email), "email already associated with another user");
            Err(DomainError::duplicate_email(email))
        }
        _ => Ok(()),
    }
}

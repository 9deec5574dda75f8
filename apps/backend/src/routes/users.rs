use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::deleted;
use crate::auth::roles::{AllowSet, Role};
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::{DomainError, EntityKind};
use crate::extractors::caller::resolve;
use crate::extractors::{BearerToken, Caller, ValidatedJson};
use crate::repos::users::{self, User};
use crate::services::UserService;
use crate::state::app_state::AppState;

const EDIT: AllowSet = AllowSet::AdminOrUser;
const DELETE: AllowSet = AllowSet::AdminOrUser;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `PUT /users/{id}`. Exactly one change per request: a password
/// (`new_password`, checked against `old_password`), an email (`email`,
/// checked against `password`), or the profile images.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserUpdateRequest {
    #[serde(default)]
    pub old_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub preview_img: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum UserChange {
    Password {
        old_password: Option<String>,
        new_password: String,
    },
    Email {
        password: Option<String>,
        email: String,
    },
    Images {
        img: Option<String>,
        preview_img: Option<String>,
    },
}

impl TryFrom<UserUpdateRequest> for UserChange {
    type Error = DomainError;

    fn try_from(body: UserUpdateRequest) -> Result<Self, Self::Error> {
        let UserUpdateRequest {
            old_password,
            new_password,
            password,
            email,
            img,
            preview_img,
        } = body;
        let images = img.is_some() || preview_img.is_some();

        match (new_password, email, images) {
            (Some(new_password), None, false) if password.is_none() => Ok(Self::Password {
                old_password,
                new_password,
            }),
            (None, Some(email), false) if old_password.is_none() => {
                Ok(Self::Email { password, email })
            }
            (None, None, true) if old_password.is_none() && password.is_none() => {
                Ok(Self::Images { img, preview_img })
            }
            (None, None, false) => Err(DomainError::validation("No changes were supplied.")),
            _ => Err(DomainError::validation(
                "Update either the password, the email or the images, one per request.",
            )),
        }
    }
}

async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(users::list_all(db).await?))
}

async fn get_user(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let user = users::get(db, path.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(user))
}

async fn register(
    state: web::Data<AppState>,
    body: ValidatedJson<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let RegisterRequest {
        username,
        password,
        email,
    } = body.into_inner();
    let service = UserService::new(state.security.password_scheme);

    let user = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(service.register(txn, &username, &password, email).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(user))
}

/// Self-service edits must present the current password; an admin editing
/// someone else does not.
fn current_password<'a>(
    caller: &User,
    target: &User,
    presented: Option<&'a str>,
) -> Result<Option<&'a str>, DomainError> {
    if caller.id != target.id && caller.role == Role::Admin {
        return Ok(None);
    }
    presented
        .map(Some)
        .ok_or_else(|| DomainError::validation("Current password is required."))
}

async fn update_user(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
    body: ValidatedJson<UserUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let actor = caller.require_owner(EDIT, id)?.clone();
    let service = UserService::new(state.security.password_scheme);
    let change = UserChange::try_from(body.into_inner())?;

    let user = with_txn(&state, move |txn| {
        Box::pin(async move {
            let target = users::get(txn, id.into()).await?;
            let updated = match change {
                UserChange::Password {
                    old_password,
                    new_password,
                } => {
                    let current = current_password(&actor, &target, old_password.as_deref())?;
                    service
                        .change_password(txn, &target, current, &new_password)
                        .await?
                }
                UserChange::Email { password, email } => {
                    let current = current_password(&actor, &target, password.as_deref())?;
                    service.change_email(txn, &target, current, email).await?
                }
                UserChange::Images { img, preview_img } => {
                    service.change_images(txn, &target, img, preview_img).await?
                }
            };
            Ok(updated)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// The target is looked up before the token is resolved, so deleting an
/// account twice answers 404 even though the token's subject is gone.
async fn delete_user(
    token: BearerToken,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let db = require_db(&state)?;
    users::get(db, id.into()).await?;

    let caller = resolve(&state, token.as_str()).await?;
    caller.require_owner(DELETE, id)?;

    let service = UserService::new(state.security.password_scheme);
    with_txn(&state, move |txn| {
        Box::pin(async move { Ok(service.delete(txn, id).await?) })
    })
    .await?;

    Ok(deleted(EntityKind::User, id))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(list_users))
            .route(web::post().to(register)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::get().to(get_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user)),
    );
}

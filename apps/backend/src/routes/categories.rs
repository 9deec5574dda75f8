use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::deleted;
use crate::auth::roles::AllowSet;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::EntityKind;
use crate::extractors::{Caller, ValidatedJson};
use crate::repos::categories::{self, CategoryCreate, CategoryUpdate};
use crate::state::app_state::AppState;

const WRITE: AllowSet = AllowSet::Admin;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub preview_img: Option<String>,
}

impl From<CreateCategoryRequest> for CategoryCreate {
    fn from(r: CreateCategoryRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            img: r.img,
            preview_img: r.preview_img,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(r: UpdateCategoryRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            img: r.img,
            preview_img: r.preview_img,
        }
    }
}

async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(categories::list_all(db).await?))
}

async fn get_category(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let category = categories::get(db, path.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(category))
}

async fn create_category(
    caller: Caller,
    state: web::Data<AppState>,
    body: ValidatedJson<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let dto = CategoryCreate::from(body.into_inner());

    let category = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(categories::create(txn, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(category))
}

async fn update_category(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
    body: ValidatedJson<UpdateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let id = path.into_inner();
    let dto = CategoryUpdate::from(body.into_inner());

    let category = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(categories::update(txn, id, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(category))
}

async fn delete_category(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let id = path.into_inner();

    with_txn(&state, move |txn| {
        Box::pin(async move { Ok(categories::delete(txn, id).await?) })
    })
    .await?;

    Ok(deleted(EntityKind::Category, id))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/categories")
            .route(web::get().to(list_categories))
            .route(web::post().to(create_category)),
    )
    .service(
        web::resource("/categories/{id}")
            .route(web::get().to(get_category))
            .route(web::put().to(update_category))
            .route(web::delete().to(delete_category)),
    );
}

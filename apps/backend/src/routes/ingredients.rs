use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::deleted;
use crate::auth::roles::AllowSet;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::EntityKind;
use crate::extractors::{Caller, ValidatedJson};
use crate::repos::ingredients::{self, IngredientCreate, IngredientUpdate};
use crate::state::app_state::AppState;

const WRITE: AllowSet = AllowSet::AdminOrUser;

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Recipe that produces this ingredient, if any.
    #[serde(default)]
    pub recipe_id: Option<i64>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub preview_img: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateIngredientRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub recipe_id: Option<i64>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

async fn list_ingredients(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(ingredients::list_all(db).await?))
}

async fn get_ingredient(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let ingredient = ingredients::get(db, path.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(ingredient))
}

async fn create_ingredient(
    caller: Caller,
    state: web::Data<AppState>,
    body: ValidatedJson<CreateIngredientRequest>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let body = body.into_inner();
    let dto = IngredientCreate {
        name: body.name,
        description: body.description,
        recipe_id: body.recipe_id,
        img: body.img,
        preview_img: body.preview_img,
    };

    let ingredient = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(ingredients::create(txn, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(ingredient))
}

async fn update_ingredient(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
    body: ValidatedJson<UpdateIngredientRequest>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let id = path.into_inner();
    let body = body.into_inner();
    let dto = IngredientUpdate {
        name: body.name,
        description: body.description,
        recipe_id: body.recipe_id,
        img: body.img,
        preview_img: body.preview_img,
    };

    let ingredient = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(ingredients::update(txn, id, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ingredient))
}

async fn delete_ingredient(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let id = path.into_inner();

    with_txn(&state, move |txn| {
        Box::pin(async move { Ok(ingredients::delete(txn, id).await?) })
    })
    .await?;

    Ok(deleted(EntityKind::Ingredient, id))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ingredients")
            .route(web::get().to(list_ingredients))
            .route(web::post().to(create_ingredient)),
    )
    .service(
        web::resource("/ingredients/{id}")
            .route(web::get().to(get_ingredient))
            .route(web::put().to(update_ingredient))
            .route(web::delete().to(delete_ingredient)),
    );
}

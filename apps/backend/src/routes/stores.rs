use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::{deleted, detail};
use crate::auth::roles::AllowSet;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::EntityKind;
use crate::extractors::{Caller, ValidatedJson};
use crate::repos::stores::{self, StoreCreate, StoreUpdate};
use crate::state::app_state::AppState;

const WRITE: AllowSet = AllowSet::AdminOrUser;

#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub preview_img: Option<String>,
}

impl From<CreateStoreRequest> for StoreCreate {
    fn from(r: CreateStoreRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            longitude: r.longitude,
            latitude: r.latitude,
            phone: r.phone,
            website: r.website,
            description: r.description,
            img: r.img,
            preview_img: r.preview_img,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

impl From<UpdateStoreRequest> for StoreUpdate {
    fn from(r: UpdateStoreRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            longitude: r.longitude,
            latitude: r.latitude,
            phone: r.phone,
            website: r.website,
            description: r.description,
            img: r.img,
            preview_img: r.preview_img,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShelfRequest {
    pub quantity: i32,
}

async fn list_stores(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(stores::list_all(db).await?))
}

async fn get_store(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    let store = stores::get(db, path.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(store))
}

async fn create_store(
    caller: Caller,
    state: web::Data<AppState>,
    body: ValidatedJson<CreateStoreRequest>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let dto = StoreCreate::from(body.into_inner());

    let store = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(stores::create(txn, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(store))
}

async fn update_store(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
    body: ValidatedJson<UpdateStoreRequest>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let id = path.into_inner();
    let dto = StoreUpdate::from(body.into_inner());

    let store = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(stores::update(txn, id, dto).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(store))
}

async fn delete_store(
    caller: Caller,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let id = path.into_inner();

    with_txn(&state, move |txn| {
        Box::pin(async move { Ok(stores::delete(txn, id).await?) })
    })
    .await?;

    Ok(deleted(EntityKind::Store, id))
}

async fn list_shelves(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&state)?;
    Ok(HttpResponse::Ok().json(stores::list_shelves(db, path.into_inner()).await?))
}

async fn set_shelf(
    caller: Caller,
    path: web::Path<(i64, i64)>,
    state: web::Data<AppState>,
    body: ValidatedJson<ShelfRequest>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let (store_id, ingredient_id) = path.into_inner();
    let quantity = body.quantity;

    let shelf = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(stores::set_shelf(txn, store_id, ingredient_id, quantity).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(shelf))
}

async fn remove_shelf(
    caller: Caller,
    path: web::Path<(i64, i64)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    caller.require(WRITE)?;
    let (store_id, ingredient_id) = path.into_inner();

    with_txn(&state, move |txn| {
        Box::pin(async move { Ok(stores::remove_shelf(txn, store_id, ingredient_id).await?) })
    })
    .await?;

    Ok(detail(format!(
        "Ingredient with ID {ingredient_id} has been removed from store with ID {store_id}."
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/stores")
            .route(web::get().to(list_stores))
            .route(web::post().to(create_store)),
    )
    .service(
        web::resource("/stores/{id}")
            .route(web::get().to(get_store))
            .route(web::put().to(update_store))
            .route(web::delete().to(delete_store)),
    )
    .service(web::resource("/stores/{id}/shelves").route(web::get().to(list_shelves)))
    .service(
        web::resource("/stores/{id}/shelves/{ingredient_id}")
            .route(web::put().to(set_shelf))
            .route(web::delete().to(remove_shelf)),
    );
}

//! HTTP surface. Each module registers its resources and declares the
//! allow-set of every operation next to the handlers that enforce it.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::errors::domain::EntityKind;
use crate::errors::ErrorCode;

pub mod auth;
pub mod categories;
pub mod health;
pub mod images;
pub mod ingredients;
pub mod recipes;
pub mod stores;
pub mod users;

/// `{"detail": "..."}` body used by delete and unlink operations.
#[derive(Debug, Serialize)]
pub struct Detail {
    pub detail: String,
}

pub(crate) fn detail(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(Detail {
        detail: message.into(),
    })
}

pub(crate) fn deleted(kind: EntityKind, id: i64) -> HttpResponse {
    detail(format!("{} with ID {id} has been deleted.", kind.label()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::not_found(ErrorCode::NotFound, format!("Invalid path: {err}")).into()
    }));

    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(users::configure_routes)
        .configure(categories::configure_routes)
        .configure(ingredients::configure_routes)
        .configure(recipes::configure_routes)
        .configure(stores::configure_routes)
        .configure(images::configure_routes);
}

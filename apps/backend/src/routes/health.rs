use actix_web::{web, HttpResponse};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use tracing::warn;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json("Hello, from Larder!"))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    commit_hash: Option<String>,
}

async fn database_ok(state: &AppState) -> bool {
    let Ok(db) = require_db(state) else {
        return false;
    };
    match db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
    {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "health check query failed");
            false
        }
    }
}

async fn health(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let status = if database_ok(&state).await {
        "healthy"
    } else {
        "unhealthy"
    };
    Ok(HttpResponse::Ok().json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        commit_hash: state.commit_hash.clone(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}

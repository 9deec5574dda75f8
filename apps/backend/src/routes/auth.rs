use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::Lookup;
use crate::services::AuthService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Password login; answers with a bearer token.
async fn issue_token(
    form: web::Form<TokenForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let db = require_db(&state)?;
    let auth = AuthService::new(state.security.jwt.clone());

    let user = auth
        .authenticate(db, Lookup::Name(form.username), &form.password)
        .await
        .inspect_err(|e| warn!(error = %e, "login failed"))?;
    let access_token = auth.issue_token(&user)?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/auth/token")
            .app_data(web::FormConfig::default().error_handler(|err, _req| {
                AppError::bad_request(ErrorCode::BadRequest, format!("Invalid form body: {err}"))
                    .into()
            }))
            .route(web::post().to(issue_token)),
    );
}

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use super::auth_token::BearerToken;
use crate::auth::roles::{ensure_owner_or_admin, validate_role, AllowSet, Role};
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::users::User;
use crate::services::AuthService;
use crate::state::app_state::AppState;

/// The identity behind a request.
///
/// No `Authorization` header yields an anonymous `Public` caller; a header
/// carrying a token that does not verify is rejected outright.
#[derive(Debug, Clone)]
pub struct Caller {
    pub role: Role,
    pub user: Option<User>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self {
            role: Role::Public,
            user: None,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            role: user.role,
            user: Some(user),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Apply the role gate and return the authenticated user.
    pub fn require(&self, allowed: AllowSet) -> Result<&User, AppError> {
        validate_role(self.role, allowed)?;
        self.user
            .as_ref()
            .ok_or_else(|| AppError::from(DomainError::unauthorized()))
    }

    /// Role gate followed by the ownership check (admins bypass).
    pub fn require_owner(&self, allowed: AllowSet, owner_id: i64) -> Result<&User, AppError> {
        let user = self.require(allowed)?;
        ensure_owner_or_admin(self.role, self.id(), owner_id)?;
        Ok(user)
    }
}

/// Resolve a token to a caller using the state's signing config.
pub async fn resolve(state: &AppState, token: &str) -> Result<Caller, AppError> {
    let db = require_db(state)?;
    let user = AuthService::new(state.security.jwt.clone())
        .authorize_token(db, token)
        .await?;
    Ok(Caller::authenticated(user))
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = BearerToken::from_headers(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let Some(token) = token? else {
                return Ok(Caller::anonymous());
            };
            let state = state.ok_or_else(|| {
                AppError::internal("AppState is not registered with the application".to_string())
            })?;
            resolve(&state, token.as_str()).await
        })
    }
}

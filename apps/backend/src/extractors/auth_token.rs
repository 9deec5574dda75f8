use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Raw bearer token from the `Authorization` header. Absent or malformed
/// headers are rejected with 401 "Not authenticated".
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// `Ok(None)` when no `Authorization` header was sent at all.
    pub fn from_headers(req: &HttpRequest) -> Result<Option<Self>, AppError> {
        let Some(value) = req.headers().get(header::AUTHORIZATION) else {
            return Ok(None);
        };
        let value = value
            .to_str()
            .map_err(|_| AppError::from(DomainError::unauthorized()))?;

        match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
                Ok(Some(BearerToken(token.trim().to_string())))
            }
            _ => Err(AppError::from(DomainError::unauthorized())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            Self::from_headers(req)
                .and_then(|t| t.ok_or_else(|| AppError::from(DomainError::unauthorized()))),
        )
    }
}

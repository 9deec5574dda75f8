use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{AuthErrorKind, ConflictKind, DomainError, EntityKind, InfraErrorKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// RFC 7807 problem details body.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Unsupported media type: {detail}")]
    UnsupportedMedia { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Timeout: {detail}")]
    Timeout { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::UnsupportedMedia { .. } => ErrorCode::UnsupportedMediaType,
            AppError::NotFound { code, .. } => *code,
            AppError::Unauthorized { code, .. } => *code,
            AppError::Forbidden { .. } => ErrorCode::Forbidden,
            AppError::Conflict { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Timeout { .. } => ErrorCode::DbTimeout,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::UnsupportedMedia { detail }
            | AppError::NotFound { detail, .. }
            | AppError::Unauthorized { detail, .. }
            | AppError::Forbidden { detail }
            | AppError::Conflict { detail, .. }
            | AppError::Db { detail }
            | AppError::DbUnavailable { detail }
            | AppError::Timeout { detail }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMedia { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: String) -> Self {
        Self::Validation {
            code,
            detail,
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn payload_too_large(detail: String) -> Self {
        Self::Validation {
            code: ErrorCode::PayloadTooLarge,
            detail,
            status: StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn not_found(code: ErrorCode, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail,
        }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable {
            detail: "Database unavailable".to_string(),
        }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(|c| c.to_lowercase()))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn not_found_code(kind: EntityKind) -> ErrorCode {
    match kind {
        EntityKind::User => ErrorCode::UserNotFound,
        EntityKind::Category => ErrorCode::CategoryNotFound,
        EntityKind::Ingredient => ErrorCode::IngredientNotFound,
        EntityKind::Recipe => ErrorCode::RecipeNotFound,
        EntityKind::Store => ErrorCode::StoreNotFound,
        EntityKind::Shelf => ErrorCode::ShelfNotFound,
        EntityKind::RecipeIngredient => ErrorCode::RecipeIngredientNotFound,
        EntityKind::RecipeCategory => ErrorCode::RecipeCategoryNotFound,
        EntityKind::Image => ErrorCode::ImageNotFound,
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::invalid(ErrorCode::ValidationError, detail),
            DomainError::UnsupportedMedia(detail) => AppError::UnsupportedMedia { detail },
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::UniqueUsername => ErrorCode::UserExists,
                    ConflictKind::UniqueEmail => ErrorCode::DuplicateEmail,
                    ConflictKind::UniqueName(_) => ErrorCode::NameExists,
                    _ => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => AppError::NotFound {
                code: not_found_code(kind),
                detail,
            },
            DomainError::Auth(kind, detail) => match kind {
                AuthErrorKind::UserNotFound => AppError::NotFound {
                    code: ErrorCode::UserNotFound,
                    detail,
                },
                AuthErrorKind::InvalidPassword => AppError::Unauthorized {
                    code: ErrorCode::InvalidPassword,
                    detail,
                },
                AuthErrorKind::InvalidCredentials => AppError::Unauthorized {
                    code: ErrorCode::InvalidCredentials,
                    detail,
                },
                AuthErrorKind::Unauthorized => AppError::Unauthorized {
                    code: ErrorCode::Unauthorized,
                    detail,
                },
                AuthErrorKind::Forbidden => AppError::Forbidden { detail },
            },
            DomainError::Contract(detail) => AppError::Internal {
                code: ErrorCode::ContractViolation,
                detail,
            },
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::Timeout { detail },
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable { detail },
                InfraErrorKind::Storage => AppError::Internal {
                    code: ErrorCode::StorageError,
                    detail,
                },
                InfraErrorKind::Config => AppError::Config { detail },
                _ => AppError::Db { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://larder.app/errors/{}", code.as_str()),
            title: Self::humanize_code(code.as_str()),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        let mut builder = HttpResponse::build(status);
        builder
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id));

        match status {
            StatusCode::UNAUTHORIZED => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            StatusCode::SERVICE_UNAVAILABLE => {
                builder.insert_header((header::RETRY_AFTER, "1"));
            }
            _ => {}
        }

        builder.json(problem_details)
    }
}

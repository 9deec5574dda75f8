// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use actix_web::body::to_bytes;
use actix_web::http::header;
use actix_web::ResponseError;

use crate::errors::domain::{ConflictKind, DomainError, EntityKind, InfraErrorKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let app: AppError = DomainError::validation("bad field").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::username_exists("alice").into();
    assert_eq!(app.code().as_str(), "USER_EXISTS");
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = DomainError::duplicate_email("a@b.io").into();
    assert_eq!(app.code(), ErrorCode::DuplicateEmail);

    let app: AppError = DomainError::name_exists(EntityKind::Store, "Corner").into();
    assert_eq!(app.code(), ErrorCode::NameExists);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found_per_entity() {
    let app: AppError = DomainError::not_found_id(EntityKind::Recipe, 3).into();
    assert_eq!(app.code(), ErrorCode::RecipeNotFound);
    assert_eq!(app.status().as_u16(), 404);
    assert_eq!(app.detail(), "Recipe with ID 3 not found.");
}

#[test]
fn maps_auth_kinds() {
    let app: AppError = DomainError::user_not_found("bob").into();
    assert_eq!(app.code(), ErrorCode::UserNotFound);
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::invalid_password().into();
    assert_eq!(app.code(), ErrorCode::InvalidPassword);
    assert_eq!(app.status().as_u16(), 401);

    let app: AppError = DomainError::invalid_credentials().into();
    assert_eq!(app.code(), ErrorCode::InvalidCredentials);
    assert_eq!(app.status().as_u16(), 401);

    let app: AppError = DomainError::unauthorized().into();
    assert_eq!(app.detail(), "Not authenticated");
    assert_eq!(app.status().as_u16(), 401);

    let app: AppError = DomainError::forbidden().into();
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_contract_and_infra() {
    let app: AppError = DomainError::contract("no key").into();
    assert_eq!(app.code(), ErrorCode::ContractViolation);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.status().as_u16(), 504);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::Config, "no jwt").into();
    assert_eq!(app.code(), ErrorCode::ConfigError);
}

#[actix_web::test]
async fn unauthorized_response_carries_bearer_challenge() {
    let app: AppError = DomainError::unauthorized().into();
    let resp = app.error_response();

    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert!(resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/problem+json"));

    let body = to_bytes(resp.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["title"], "Unauthorized");
    assert_eq!(json["detail"], "Not authenticated");
    assert_eq!(json["trace_id"], "unknown");
}

#[test]
fn forbidden_response_has_no_challenge() {
    let app: AppError = DomainError::forbidden().into();
    let resp = app.error_response();
    assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
    assert_eq!(resp.status().as_u16(), 403);
}

//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Catalog resources that can be looked up or conflict on a natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Category,
    Ingredient,
    Recipe,
    Store,
    Shelf,
    RecipeIngredient,
    RecipeCategory,
    Image,
}

impl EntityKind {
    /// Human label used in user-facing messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Category => "Category",
            Self::Ingredient => "Ingredient",
            Self::Recipe => "Recipe",
            Self::Store => "Store",
            Self::Shelf => "Shelf",
            Self::RecipeIngredient => "Recipe ingredient",
            Self::RecipeCategory => "Recipe category",
            Self::Image => "Image",
        }
    }
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Storage,
    Config,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UniqueUsername,
    UniqueEmail,
    UniqueName(EntityKind),
    Other(String),
}

/// Authentication and authorization failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Login lookup found no such user
    UserNotFound,
    /// Password did not match the stored digest
    InvalidPassword,
    /// Token rejected; cause deliberately not exposed
    InvalidCredentials,
    /// No identity presented
    Unauthorized,
    /// Identity presented but not allowed
    Forbidden,
}

pub const MSG_INVALID_PASSWORD: &str = "The provided password is invalid.";
pub const MSG_INVALID_CREDENTIALS: &str = "Could not validate credentials.";
pub const MSG_UNAUTHORIZED: &str = "Not authenticated";
pub const MSG_FORBIDDEN: &str = "You do not have permission to perform this action.";

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(String),
    /// Uploaded content in a format we don't handle
    UnsupportedMedia(String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(EntityKind, String),
    /// Authentication / authorization failure
    Auth(AuthErrorKind, String),
    /// Caller broke an API contract (a bug, not a runtime condition)
    Contract(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::UnsupportedMedia(d) => write!(f, "unsupported media: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Auth(kind, d) => write!(f, "auth {kind:?}: {d}"),
            DomainError::Contract(d) => write!(f, "contract violation: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: EntityKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn contract(detail: impl Into<String>) -> Self {
        Self::Contract(detail.into())
    }

    /// "<Entity> with ID <id> not found."
    pub fn not_found_id(kind: EntityKind, id: i64) -> Self {
        Self::NotFound(kind, format!("{} with ID {id} not found.", kind.label()))
    }

    /// "<Entity> with name '<name>' not found."
    pub fn not_found_name(kind: EntityKind, name: &str) -> Self {
        Self::NotFound(kind, format!("{} with name '{name}' not found.", kind.label()))
    }

    /// "<Entity> with name '<name>' already exists."
    pub fn name_exists(kind: EntityKind, name: &str) -> Self {
        Self::Conflict(
            ConflictKind::UniqueName(kind),
            format!("{} with name '{name}' already exists.", kind.label()),
        )
    }

    pub fn username_exists(username: &str) -> Self {
        Self::Conflict(
            ConflictKind::UniqueUsername,
            format!("User with username '{username}' already exists."),
        )
    }

    pub fn duplicate_email(email: &str) -> Self {
        Self::Conflict(
            ConflictKind::UniqueEmail,
            format!("Email '{email}' is already associated with another user."),
        )
    }

    pub fn user_not_found(username: &str) -> Self {
        Self::Auth(
            AuthErrorKind::UserNotFound,
            format!("User with username '{username}' not found."),
        )
    }

    pub fn invalid_password() -> Self {
        Self::Auth(AuthErrorKind::InvalidPassword, MSG_INVALID_PASSWORD.into())
    }

    pub fn invalid_credentials() -> Self {
        Self::Auth(
            AuthErrorKind::InvalidCredentials,
            MSG_INVALID_CREDENTIALS.into(),
        )
    }

    pub fn unauthorized() -> Self {
        Self::Auth(AuthErrorKind::Unauthorized, MSG_UNAUTHORIZED.into())
    }

    pub fn forbidden() -> Self {
        Self::Auth(AuthErrorKind::Forbidden, MSG_FORBIDDEN.into())
    }

    /// Detail text without the kind prefix added by `Display`.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(d)
            | DomainError::UnsupportedMedia(d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Auth(_, d)
            | DomainError::Contract(d)
            | DomainError::Infra(_, d) => d,
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}

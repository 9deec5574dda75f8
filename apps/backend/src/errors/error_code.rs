//! Error codes for the Larder backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Larder backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No identity presented
    Unauthorized,
    /// Token failed signature/expiry checks or names a missing user
    InvalidCredentials,
    /// Password did not match the stored digest
    InvalidPassword,
    /// Identity present but role or ownership insufficient
    Forbidden,

    // Request Validation
    ValidationError,
    BadRequest,
    UnsupportedMediaType,
    PayloadTooLarge,

    // Resource Not Found
    UserNotFound,
    CategoryNotFound,
    IngredientNotFound,
    RecipeNotFound,
    StoreNotFound,
    ShelfNotFound,
    RecipeIngredientNotFound,
    RecipeCategoryNotFound,
    ImageNotFound,
    NotFound,

    // Conflicts
    UserExists,
    NameExists,
    DuplicateEmail,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    StorageError,
    Internal,
    ConfigError,
    ContractViolation,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::Forbidden => "FORBIDDEN",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::StoreNotFound => "STORE_NOT_FOUND",
            Self::ShelfNotFound => "SHELF_NOT_FOUND",
            Self::RecipeIngredientNotFound => "RECIPE_INGREDIENT_NOT_FOUND",
            Self::RecipeCategoryNotFound => "RECIPE_CATEGORY_NOT_FOUND",
            Self::ImageNotFound => "IMAGE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UserExists => "USER_EXISTS",
            Self::NameExists => "NAME_EXISTS",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::StorageError => "STORAGE_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ContractViolation => "CONTRACT_VIOLATION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

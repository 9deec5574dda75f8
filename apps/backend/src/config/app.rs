//! Process configuration, read once at startup.
//!
//! Everything here is resolved into plain values before the server starts;
//! services receive what they need through `AppState` and never read the
//! environment themselves.

use std::env;
use std::path::PathBuf;

use crate::auth::password::PasswordScheme;
use crate::config::db::DbBackend;
use crate::error::AppError;
use crate::state::security_config::{
    JwtAlgorithm, JwtConfig, SecurityConfig, DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_IMAGE_STORE_DIR: &str = "./data/images";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub security: SecurityConfig,
    pub host: String,
    pub port: u16,
    pub image_store_dir: PathBuf,
    pub commit_hash: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let must = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::config(format!("Missing required environment variable: {key}"))
            })
        };

        let database_url = must("DATABASE_URL")?;
        DbBackend::from_url(&database_url)?;

        let algorithm = match get("JWT_ALGORITHM") {
            Some(raw) => raw
                .parse::<JwtAlgorithm>()
                .map_err(|e| AppError::config(e.detail().to_string()))?,
            None => JwtAlgorithm::default(),
        };
        let expire_minutes = parse_expire_minutes(get("JWT_ACCESS_TOKEN_EXPIRE_MINUTES"))?;
        let jwt = JwtConfig::new(must("JWT_SECRET_KEY")?)
            .with_algorithm(algorithm)
            .with_expire_minutes(expire_minutes)
            .map_err(|e| AppError::config(e.detail().to_string()))?;

        let password_scheme = match get("PASSWORD_HASH_SCHEME") {
            Some(raw) => raw
                .parse::<PasswordScheme>()
                .map_err(|e| AppError::config(e.detail().to_string()))?,
            None => PasswordScheme::default(),
        };

        let port = match get("BACKEND_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT must be a port number, got '{raw}'")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            security: SecurityConfig::new(jwt).with_password_scheme(password_scheme),
            host: get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            image_store_dir: get("IMAGE_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_STORE_DIR)),
            commit_hash: get("COMMIT_HASH"),
        })
    }
}

/// `None` input means the default lifetime; the literal `none` disables expiry.
fn parse_expire_minutes(raw: Option<String>) -> Result<Option<u32>, AppError> {
    let Some(raw) = raw else {
        return Ok(Some(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES));
    };
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match raw.parse::<u32>() {
        Ok(minutes) if minutes >= 1 => Ok(Some(minutes)),
        _ => Err(AppError::config(format!(
            "JWT_ACCESS_TOKEN_EXPIRE_MINUTES must be a positive integer or 'none', got '{raw}'"
        ))),
    }
}

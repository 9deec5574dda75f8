use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::auth::password::PasswordScheme;
use crate::errors::domain::DomainError;

/// One year, in minutes.
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: u32 = 525_600;

/// HMAC algorithms accepted for signing access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JwtAlgorithm {
    #[default]
    HS256,
    HS384,
    HS512,
}

impl JwtAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
        }
    }
}

impl FromStr for JwtAlgorithm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            other => Err(DomainError::validation(format!(
                "Unsupported JWT algorithm '{other}'. Expected one of HS256, HS384, HS512."
            ))),
        }
    }
}

impl From<JwtAlgorithm> for Algorithm {
    fn from(a: JwtAlgorithm) -> Self {
        match a {
            JwtAlgorithm::HS256 => Algorithm::HS256,
            JwtAlgorithm::HS384 => Algorithm::HS384,
            JwtAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

/// Signing settings for access tokens. Immutable once built.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Vec<u8>,
    algorithm: JwtAlgorithm,
    /// `None` disables the `exp` claim entirely.
    access_token_expire_minutes: Option<u32>,
}

impl JwtConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: JwtAlgorithm::default(),
            access_token_expire_minutes: Some(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES),
        }
    }

    pub fn with_algorithm(mut self, algorithm: JwtAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Token lifetime; must be at least one minute when set.
    pub fn with_expire_minutes(mut self, minutes: Option<u32>) -> Result<Self, DomainError> {
        if minutes == Some(0) {
            return Err(DomainError::validation(
                "JWT access token lifetime must be at least 1 minute.",
            ));
        }
        self.access_token_expire_minutes = minutes;
        Ok(self)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn algorithm(&self) -> JwtAlgorithm {
        self.algorithm
    }

    pub fn access_token_expire_minutes(&self) -> Option<u32> {
        self.access_token_expire_minutes
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

/// Security settings shared by the auth service and handlers.
#[derive(Debug, Clone, Default)]
pub struct SecurityConfig {
    /// Absent only when a caller deliberately builds a state without signing keys.
    pub jwt: Option<JwtConfig>,
    pub password_scheme: PasswordScheme,
}

impl SecurityConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt: Some(jwt),
            password_scheme: PasswordScheme::default(),
        }
    }

    pub fn with_password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.password_scheme = scheme;
        self
    }

    /// Random secret, default lifetime. Each call yields a distinct signing key.
    pub fn for_tests() -> Self {
        Self::new(JwtConfig::new(uuid::Uuid::new_v4().as_bytes().to_vec()))
    }
}

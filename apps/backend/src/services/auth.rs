//! Password login and bearer-token issue / verification.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use tracing::{debug, warn};

use crate::auth::jwt::{mint_access_token, verify_access_token};
use crate::auth::password;
use crate::errors::domain::{AuthErrorKind, DomainError, InfraErrorKind};
use crate::repos::users::{self, User};
use crate::repos::Lookup;
use crate::state::security_config::JwtConfig;

/// Stateless; holds only the signing configuration it was built with.
#[derive(Debug, Clone)]
pub struct AuthService {
    jwt: Option<JwtConfig>,
}

impl AuthService {
    pub fn new(jwt: Option<JwtConfig>) -> Self {
        Self { jwt }
    }

    fn jwt(&self) -> Result<&JwtConfig, DomainError> {
        self.jwt.as_ref().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::Config,
                "Token signing is not configured (JWT_SECRET_KEY missing)",
            )
        })
    }

    /// Check a password against the stored digest of the user named by `who`.
    pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        who: Lookup,
        plaintext: &str,
    ) -> Result<User, DomainError> {
        let user = match &who {
            Lookup::Id(id) => users::find_by_id(conn, *id).await?.ok_or_else(|| {
                DomainError::Auth(
                    AuthErrorKind::UserNotFound,
                    format!("User with ID {id} not found."),
                )
            })?,
            Lookup::Name(username) => users::find_by_username(conn, username)
                .await?
                .ok_or_else(|| DomainError::user_not_found(username))?,
        };

        if !password::verify(plaintext, &user.password_digest) {
            warn!(user_id = user.id, "login rejected: wrong password");
            return Err(DomainError::invalid_password());
        }
        Ok(user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.issue_token_at(user, SystemTime::now())
    }

    pub fn issue_token_at(&self, user: &User, now: SystemTime) -> Result<String, DomainError> {
        mint_access_token(&user.username, now, self.jwt()?)
    }

    /// Resolve a bearer token to the user it names.
    ///
    /// Every failure, including a subject that no longer exists, is
    /// `InvalidCredentials`.
    pub async fn authorize_token<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        token: &str,
    ) -> Result<User, DomainError> {
        let claims = verify_access_token(token, self.jwt()?)?;
        match users::find_by_username(conn, &claims.sub).await? {
            Some(user) => Ok(user),
            None => {
                debug!(reason = "unknown_subject", "access token rejected");
                Err(DomainError::invalid_credentials())
            }
        }
    }
}

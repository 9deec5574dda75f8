//! Registration and self-service account changes.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::auth::password::{self, PasswordScheme};
use crate::auth::roles::Role;
use crate::auth::validator::{normalize_email, validate_password};
use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, NewUser, User};

#[derive(Debug, Clone, Copy, Default)]
pub struct UserService {
    scheme: PasswordScheme,
}

impl UserService {
    pub fn new(scheme: PasswordScheme) -> Self {
        Self { scheme }
    }

    /// Self-registration; the new account always has role `user`. The
    /// username is stored trimmed and a blank email counts as none.
    pub async fn register<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
        plaintext: &str,
        email: Option<String>,
    ) -> Result<User, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("Username must not be empty."));
        }
        validate_password(plaintext)?;
        let email = normalize_email(email)?;
        let user = users::create(
            conn,
            NewUser {
                username: username.to_string(),
                email,
                password_digest: self.scheme.digest(plaintext)?,
                role: Role::User,
            },
        )
        .await?;
        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Replace the password. `current` is checked when given; admins editing
    /// another account pass `None`.
    pub async fn change_password<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        target: &User,
        current: Option<&str>,
        new_plaintext: &str,
    ) -> Result<User, DomainError> {
        check_current(target, current)?;
        validate_password(new_plaintext)?;
        let user = users::update_password(conn, target.id, self.scheme.digest(new_plaintext)?).await?;
        info!(user_id = user.id, "password changed");
        Ok(user)
    }

    pub async fn change_email<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        target: &User,
        current: Option<&str>,
        email: String,
    ) -> Result<User, DomainError> {
        check_current(target, current)?;
        let email = normalize_email(Some(email))?
            .ok_or_else(|| DomainError::validation("Email must not be empty."))?;
        let user = users::update_email(conn, target.id, email).await?;
        info!(
            user_id = user.id,
            email = %Redacted(user.email.as_deref().unwrap_or_default()),
            "email changed"
        );
        Ok(user)
    }

    pub async fn change_images<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        target: &User,
        img: Option<String>,
        preview_img: Option<String>,
    ) -> Result<User, DomainError> {
        users::update_images(conn, target.id, img, preview_img).await
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        users::delete(conn, id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}

fn check_current(target: &User, current: Option<&str>) -> Result<(), DomainError> {
    match current {
        Some(plaintext) if !password::verify(plaintext, &target.password_digest) => {
            Err(DomainError::invalid_password())
        }
        _ => Ok(()),
    }
}

//! DTOs for users_sea adapter.

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: Option<String>,
    /// Password digest, never the plaintext.
    pub password_digest: String,
    pub role: String,
}

impl UserCreate {
    pub fn new(username: impl Into<String>, password_digest: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            password_digest: password_digest.into(),
            role: "user".to_string(),
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// DTO for updating a user; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password_digest: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
}

//! Password complexity and email shape rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::domain::DomainError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Rules run in this order; the first failure is reported.
const RULES: &[(fn(char) -> bool, &str)] = &[
    (
        |c| c.is_ascii_digit(),
        "Password must contain at least one digit.",
    ),
    (
        |c| c.is_uppercase(),
        "Password must contain at least one uppercase letter.",
    ),
    (
        |c| c.is_lowercase(),
        "Password must contain at least one lowercase letter.",
    ),
    (
        |c| !c.is_alphanumeric(),
        "Password must contain at least one special character.",
    ),
];

/// Accept `password` if it meets the length and character-class rules.
pub fn validate_password(password: &str) -> Result<&str, DomainError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(DomainError::validation(format!(
            "Password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters long."
        )));
    }

    for (matches, message) in RULES {
        if !password.chars().any(matches) {
            return Err(DomainError::validation(*message));
        }
    }

    Ok(password)
}

#[allow(clippy::unwrap_used)]
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$").unwrap()
});

/// Trim an optional email; blank means no email. Anything else must look
/// like `local@domain.tld`.
pub fn normalize_email(email: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(email) = email else {
        return Ok(None);
    };
    let email = email.trim();
    if email.is_empty() {
        return Ok(None);
    }
    if email.len() > 254 || !EMAIL.is_match(email) {
        return Err(DomainError::validation(format!(
            "Email '{email}' is not a valid email address."
        )));
    }
    Ok(Some(email.to_string()))
}

//! Password digests.
//!
//! The default scheme is an unsalted SHA-256 hex digest, so
//! `verify(p, d) == (hash(p) == d)`. The Argon2id scheme produces salted PHC
//! strings. `verify` dispatches on the stored digest's shape, which keeps old
//! digests valid after `PASSWORD_HASH_SCHEME` changes.

use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher};
use sha2::{Digest, Sha256};

use crate::errors::domain::{DomainError, InfraErrorKind};

const ARGON2_PREFIX: &str = "$argon2";

/// Which digest new passwords are stored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Sha256,
    Argon2,
}

impl FromStr for PasswordScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "argon2" | "argon2id" => Ok(Self::Argon2),
            other => Err(DomainError::validation(format!(
                "Unknown password hash scheme '{other}'. Expected sha256 or argon2."
            ))),
        }
    }
}

impl PasswordScheme {
    /// Digest `plaintext` for storage.
    pub fn digest(&self, plaintext: &str) -> Result<String, DomainError> {
        match self {
            Self::Sha256 => Ok(hash(plaintext)),
            Self::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(plaintext.as_bytes(), &salt)
                    .map(|h| h.to_string())
                    .map_err(|e| {
                        DomainError::infra(
                            InfraErrorKind::Other("PasswordHash".into()),
                            format!("Password hashing failed: {e}"),
                        )
                    })
            }
        }
    }
}

/// Deterministic SHA-256 digest, lowercase hex.
pub fn hash(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// Check `plaintext` against a stored digest of either scheme.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    if digest.starts_with(ARGON2_PREFIX) {
        return PasswordHash::new(digest)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false);
    }
    hash(plaintext) == digest
}

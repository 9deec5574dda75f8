//! Object store for uploaded images.
//!
//! Keys are flat names (`<md5 hex>.<ext>`); implementations must reject
//! anything else so a key can never address outside the store.

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::domain::{DomainError, EntityKind, InfraErrorKind};

mod local;
mod memory;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

/// A stored object and the content type it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Bytes,
    pub content_type: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync + Debug {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), DomainError>;

    /// Read the object under `key`; `NotFound(Image)` when absent.
    async fn get(&self, key: &str) -> Result<StoredBlob, DomainError>;
}

#[allow(clippy::unwrap_used)]
static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]{32}\.[a-z0-9]{2,5}$").unwrap());

/// Reject keys that are not `<md5 hex>.<ext>`.
pub fn validate_key(key: &str) -> Result<(), DomainError> {
    if KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(DomainError::validation(format!("Invalid image key '{key}'.")))
    }
}

pub(crate) fn not_found(key: &str) -> DomainError {
    DomainError::not_found(EntityKind::Image, format!("Image '{key}' not found."))
}

pub(crate) fn storage_err(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::Storage, detail)
}

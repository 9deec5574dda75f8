use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use super::{not_found, storage_err, validate_key, BlobStore, StoredBlob};
use crate::errors::domain::DomainError;

const CONTENT_TYPE_SUFFIX: &str = ".content-type";

/// Filesystem-backed store: one file per key plus a sidecar holding its content type.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root)
            .await
            .map_err(|e| storage_err(format!("Cannot create image store directory: {e}")))?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sidecar(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}{CONTENT_TYPE_SUFFIX}"))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), DomainError> {
        validate_key(key)?;
        fs::write(self.root.join(key), &bytes)
            .await
            .map_err(|e| storage_err(format!("Failed to write image: {e}")))?;
        fs::write(self.sidecar(key), content_type.as_bytes())
            .await
            .map_err(|e| storage_err(format!("Failed to write image metadata: {e}")))?;
        debug!(key, size = bytes.len(), content_type, "blob stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredBlob, DomainError> {
        validate_key(key)?;
        let bytes = match fs::read(self.root.join(key)).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found(key)),
            Err(e) => return Err(storage_err(format!("Failed to read image: {e}"))),
        };
        let content_type = fs::read_to_string(self.sidecar(key))
            .await
            .unwrap_or_else(|_| "application/octet-stream".to_string());
        Ok(StoredBlob {
            bytes: Bytes::from(bytes),
            content_type,
        })
    }
}

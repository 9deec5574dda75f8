use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use super::{not_found, validate_key, BlobStore, StoredBlob};
use crate::errors::domain::DomainError;

/// In-process store used by tests and when no image directory is configured.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, StoredBlob>,
}

impl MemoryBlobStore {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.iter().map(|e| e.key().clone()).collect()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), DomainError> {
        validate_key(key)?;
        self.objects.insert(
            key.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredBlob, DomainError> {
        validate_key(key)?;
        self.objects
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| not_found(key))
    }
}

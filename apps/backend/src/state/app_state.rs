use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::storage::{BlobStore, MemoryBlobStore};

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Token signing and password hashing settings
    pub security: SecurityConfig,
    /// Object store for uploaded images
    pub blobs: Arc<dyn BlobStore>,
    /// Build identifier reported by `/health`
    pub commit_hash: Option<String>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            blobs: Arc::new(MemoryBlobStore::default()),
            commit_hash: None,
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            blobs: Arc::new(MemoryBlobStore::default()),
            commit_hash: None,
        }
    }

    pub fn with_blobs(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = blobs;
        self
    }

    pub fn with_commit_hash(mut self, commit_hash: Option<String>) -> Self {
        self.commit_hash = commit_hash;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

use std::sync::Arc;

use crate::error::AppError;
use crate::infra::db::connect_and_migrate;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::storage::BlobStore;

/// Builder for [`AppState`], used by `main` and by tests.
///
/// ```ignore
/// let state = build_state()
///     .with_db_url("sqlite::memory:")
///     .with_security(SecurityConfig::for_tests())
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct StateBuilder {
    db_url: Option<String>,
    security: SecurityConfig,
    blobs: Option<Arc<dyn BlobStore>>,
    commit_hash: Option<String>,
}

pub fn build_state() -> StateBuilder {
    StateBuilder::default()
}

impl StateBuilder {
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    pub fn with_blobs(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    pub fn with_commit_hash(mut self, commit_hash: Option<String>) -> Self {
        self.commit_hash = commit_hash;
        self
    }

    /// Connect and migrate when a URL was given; otherwise the state has no database.
    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db_url {
            Some(url) => AppState::new(connect_and_migrate(&url).await?, self.security),
            None => AppState::new_without_db(self.security),
        };
        let state = match self.blobs {
            Some(blobs) => state.with_blobs(blobs),
            None => state,
        };
        Ok(state.with_commit_hash(self.commit_hash))
    }
}

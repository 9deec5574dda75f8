#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use auth::roles::{AllowSet, Role};
pub use config::AppConfig;
pub use db::txn::with_txn;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use extractors::{BearerToken, Caller, ValidatedJson};
pub use infra::db::connect_and_migrate;
pub use infra::state::build_state;
pub use middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;
pub use state::security_config::{JwtConfig, SecurityConfig};
pub use storage::{BlobStore, LocalBlobStore, MemoryBlobStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}

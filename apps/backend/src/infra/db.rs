use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{is_sqlite_memory, redact_url, DbBackend};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;
const POOL_MAX_CONNECTIONS: u32 = 10;

/// Retry `connect_fn` at a fixed interval, returning the last error when all attempts fail.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(url: &str) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.sqlx_logging(false);
    if is_sqlite_memory(url) {
        // Each connection would otherwise open its own empty database.
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(POOL_MAX_CONNECTIONS);
    }
    opts
}

/// Open the pool and bring the schema up to date.
pub async fn connect_and_migrate(url: &str) -> Result<DatabaseConnection, AppError> {
    let backend = DbBackend::from_url(url)?;
    let attempts = if is_sqlite_memory(url) { 1 } else { CONNECT_ATTEMPTS };

    let conn = retry_connection(
        || async {
            Database::connect(connect_options(url))
                .await
                .map_err(AppError::from)
        },
        attempts,
        CONNECT_INTERVAL_MS,
    )
    .await?;
    info!(backend = ?backend, url = %redact_url(url), "database connected");

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Database migration failed: {e}")))?;
    Ok(conn)
}

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use larder::config::AppConfig;
use larder::infra::state::build_state;
use larder::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use larder::routes;
use larder::storage::LocalBlobStore;
use tracing::{error, info};

mod telemetry;

fn exit_with(message: &str, err: impl std::fmt::Display) -> ! {
    error!(error = %err, "{message}");
    eprintln!("❌ {message}: {err}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => exit_with("Invalid configuration", e),
    };

    let blobs = match LocalBlobStore::open(config.image_store_dir.clone()).await {
        Ok(store) => store,
        Err(e) => exit_with("Failed to open image store", e),
    };

    let app_state = match build_state()
        .with_db_url(config.database_url.clone())
        .with_security(config.security.clone())
        .with_blobs(Arc::new(blobs))
        .with_commit_hash(config.commit_hash.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => exit_with("Failed to build application state", e),
    };

    info!(host = %config.host, port = config.port, "🚀 Starting Larder backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use inventory_api::config::Config;
use inventory_api::db::{connect, MongoItemRepository};
use inventory_api::services::{self, AppState};
use inventory_api::storage::{S3Backend, StorageBackend};

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting inventory-api server...");
    tracing::info!("Connecting to database...");

    // A dead database is fatal at startup; everything after this point
    // degrades to per-request errors instead.
    let client = match connect(&config.mongodb_uri).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("MongoDB connection error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("MongoDB connected");

    let database = match &config.mongodb_db {
        Some(name) => client.database(name),
        None => client.default_database().unwrap_or_else(|| {
            tracing::error!("No database in MONGODB_URI and MONGODB_DB is unset");
            std::process::exit(1);
        }),
    };

    let storage = S3Backend::new(
        config.aws_bucket_name.clone(),
        config.aws_region.clone(),
        config.aws_access_key_id.clone(),
        config.aws_secret_access_key.clone(),
    )
    .context("Failed to create S3 client")?;
    tracing::info!("S3 storage enabled: bucket={}", storage.bucket());

    let state = AppState {
        items: Arc::new(MongoItemRepository::new(&database)),
        storage: Arc::new(storage),
    };

    let app = services::router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");

    tracing::info!("Shutdown signal received");
}

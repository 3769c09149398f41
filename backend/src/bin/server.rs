//! Availability HTTP Server Binary
//!
//! This is the main entry point for the availability REST API server.
//! It builds the repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run against the on-disk SQLite database (default)
//! cargo run --bin availability-server
//!
//! # Run with the in-memory repository
//! REPOSITORY_TYPE=local cargo run --bin availability-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `STATIC_DIR`: Frontend bundle directory (default: static)
//! - `REPOSITORY_TYPE`: `sqlite` or `local` (default: sqlite)
//! - `DATABASE_URL` / `SQLITE_DATABASE_PATH`: Database file (default: availability.db)
//! - `RUST_LOG`: Log filter (default: info)

use std::path::Path;

use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use availability::db::RepositoryFactory;
use availability::http::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting availability server");

    // repository.toml wins when present, otherwise the environment.
    let repository = RepositoryFactory::from_config_or_env(Path::new(".")).await?;
    info!("Repository initialized successfully");

    let config = ServerConfig::from_env().map_err(anyhow::Error::msg)?;
    let state = AppState::new(repository).with_static_dir(&config.static_dir);
    let app = create_router(state);

    let addr = config.socket_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Serving frontend from {}", config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

//! Axum server setup and router configuration
//!
//! Permissive CORS so any frontend can consume the API — there are no
//! credentials to protect. Request tracing on every route. Graceful
//! shutdown on Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db::Database;
use crate::routes::build_router;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind: String,

    /// Port to listen on
    pub port: u16,

    /// SQLite database file path
    pub db_path: PathBuf,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the router around an already-connected database.
///
/// Split out from [`run_server`] so tests can drive the full middleware
/// stack against an in-memory database.
pub fn create_router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    build_router(AppState { db }).layer(middleware)
}

/// Run the HTTP server until shutdown.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.db_path)
        .await
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;

    let app = create_router(db);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .context("invalid bind address")?;

    let listener = TcpListener::bind(addr).await?;
    info!("itemd listening on http://{}", addr);
    info!("database: {}", config.db_path.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            warn!("received SIGTERM, starting shutdown");
        }
    }
}

//! Axum server setup
//!
//! Server skeleton with:
//! - CORS allow-list with credentials (from config)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, then store teardown

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::{ConfigError, ServerConfig};
use crate::db::{DbError, SurveyStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SurveyStore>) -> Self {
        Self { store }
    }
}

/// Build the CORS layer for the configured origins.
///
/// Listed origins get credentials and every method/header. Permissive mode
/// mirrors any origin.
pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return Ok(CorsLayer::very_permissive());
    }

    let origins = config.cors_origin_values()?;
    tracing::debug!(origins = ?config.cors_origins, "CORS allow-list");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Build the application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::submissions::router())
        .merge(routes::feedback::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// Ensures the tables exist, serves until a shutdown signal arrives, then
/// closes the store.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&config.database_url, config.max_connections).await?;
/// run_server(Arc::new(PgStore::new(pool)), &config).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn SurveyStore>,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    let cors = cors_layer(config)?;
    store.ensure_schema().await?;

    let app = build_router(AppState::new(store.clone()), cors);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    served?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_rejects_bad_origin() {
        let config = ServerConfig {
            cors_origins: vec!["not an origin".into()],
            ..ServerConfig::default()
        };
        assert!(matches!(cors_layer(&config), Err(ConfigError::Origin { .. })));
    }

    #[test]
    fn permissive_cors_skips_origin_parsing() {
        let config = ServerConfig {
            cors_origins: vec!["not an origin".into()],
            cors_permissive: true,
            ..ServerConfig::default()
        };
        assert!(cors_layer(&config).is_ok());
    }
}

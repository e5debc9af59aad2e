//! Axum server setup.
//!
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use swimdash_core::config::ServerSection;
use swimdash_core::{Dashboard, DistanceUnit};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8050)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Build from the `[server]` section of the config file.
    pub fn from_section(section: &ServerSection) -> Result<Self, ServerError> {
        let bind_addr = format!("{}:{}", section.host, section.port)
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                addr: format!("{}:{}", section.host, section.port),
                source,
            })?;
        Ok(Self {
            bind_addr,
            cors_permissive: section.cors_permissive,
        })
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    /// Unit for the formatted card text in responses
    pub units: DistanceUnit,
}

impl AppState {
    pub fn new(dashboard: Dashboard, units: DistanceUnit) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            units,
        }
    }
}

/// All API routes over the shared state, without CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::workouts::router())
        .merge(routes::strokes::router())
        .merge(routes::totals::router())
        .merge(routes::series::router())
        .merge(routes::records::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    let port = config.bind_addr.port();
    let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| HeaderValue::from_str(&format!("http://{}:{}", host, port)).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        records = state.dashboard.records().len(),
        aggregates = state.dashboard.aggregates().len(),
        units = %state.units,
        "serving dashboard"
    );

    let app = build_router(state).layer(cors_layer(&config));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
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

    #[error("Invalid bind address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        source: AddrParseError,
    },
}

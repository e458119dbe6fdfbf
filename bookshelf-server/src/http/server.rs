//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing and request timeout middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::store::Shelf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:9000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 9000)),
            cors_permissive: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared application state
///
/// The shelf sits behind a single lock: list/get share it, while
/// create/update/delete hold it exclusively.
pub struct AppState {
    shelf: RwLock<Shelf>,
}

impl AppState {
    pub fn new(shelf: Shelf) -> Self {
        Self {
            shelf: RwLock::new(shelf),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Shelf> {
        self.shelf.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Shelf> {
        self.shelf.write().await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Shelf::new())
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(localhost_origins(config.bind_addr.port()))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let router = Router::new()
        .merge(routes::health::router())
        .merge(routes::books::router());

    with_request_timeout(router, config.request_timeout)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Abort slow requests with a 504 carrying the error envelope.
fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            timeout,
        ))
        .layer(middleware::map_response_with_state(
            timeout.as_secs(),
            fail_on_timeout,
        ))
}

/// Replace the empty body `TimeoutLayer` produces with an `ApiError` body.
async fn fail_on_timeout(State(seconds): State<u64>, response: Response) -> Response {
    if response.status() == StatusCode::GATEWAY_TIMEOUT {
        return ApiError::Timeout { seconds }.into_response();
    }
    response
}

fn localhost_origins(port: u16) -> Vec<HeaderValue> {
    ["localhost", "127.0.0.1"]
        .iter()
        .flat_map(|host| [3000, port].map(|p| format!("http://{}:{}", host, p)))
        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
        .collect()
}

/// Run the HTTP server over an empty shelf.
///
/// # Example
///
/// ```ignore
/// run_server(ServerConfig::default()).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::default());
    let app = build_router(state, &config);

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
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
}

//! Liveness endpoint reporting the shelf size

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Books currently on the shelf
    pub books: usize,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let books = state.read().await.len();
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        books,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

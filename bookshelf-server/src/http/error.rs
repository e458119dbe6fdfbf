//! API error types with IntoResponse
//!
//! Errors are converted to `{status, message}` JSON bodies. Each failure
//! carries the action that produced it because the user-facing message
//! differs per action (adding, updating, deleting, ...).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::store::{NoMatch, StoreError};

/// Book operation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    List,
    Fetch,
    Update,
    Delete,
}

impl BookAction {
    fn failure_prefix(self) -> &'static str {
        match self {
            Self::Add => "Gagal menambahkan buku",
            Self::Update => "Gagal memperbarui buku",
            Self::Delete => "Buku gagal dihapus",
            Self::List | Self::Fetch => "Gagal memproses permintaan",
        }
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Input rejected (400)
    Validation {
        action: BookAction,
        error: ValidationError,
    },

    /// No book with that id (404)
    NotFound { action: BookAction, id: String },

    /// Listing produced no books (400)
    NoMatch(NoMatch),

    /// Body could not be decoded (400)
    InvalidPayload { reason: String },

    /// Query string could not be decoded (400)
    InvalidQuery { reason: String },

    /// Path segment could not be extracted (400)
    InvalidPath { reason: String },

    /// Request exceeded the server timeout (504)
    Timeout { seconds: u64 },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Attach the action to a store failure.
    pub fn from_store(action: BookAction, err: StoreError) -> Self {
        match err {
            StoreError::Validation(error) => Self::Validation { action, error },
            StoreError::NotFound { id } => Self::NotFound { action, id },
            StoreError::NoMatch(reason) => Self::NoMatch(reason),
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::NoMatch(_)
            | Self::InvalidPayload { .. }
            | Self::InvalidQuery { .. }
            | Self::InvalidPath { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { action, error } => match error {
                ValidationError::MissingName => {
                    format!("{}. Mohon isi nama buku", action.failure_prefix())
                }
                ValidationError::ReadPageExceedsPageCount { .. } => format!(
                    "{}. readPage tidak boleh lebih besar dari pageCount",
                    action.failure_prefix()
                ),
                ValidationError::InvalidFlag { field, .. } => {
                    format!("Parameter {} yang diminta tidak sesuai", field)
                }
            },
            Self::NotFound { action, .. } => match action {
                BookAction::Update | BookAction::Delete => {
                    format!("{}. Id tidak ditemukan", action.failure_prefix())
                }
                _ => "Buku tidak ditemukan".to_string(),
            },
            Self::NoMatch(NoMatch::EmptyShelf) => "Belum ada buku yang tersimpan".to_string(),
            Self::NoMatch(NoMatch::Filtered { name: Some(name) }) => format!(
                "Tidak ada buku yang ditemukan dengan nama yang mengandung \"{}\"",
                name
            ),
            Self::NoMatch(NoMatch::Filtered { name: None }) => {
                "Tidak ada buku yang ditemukan".to_string()
            }
            Self::InvalidPayload { .. } => {
                "Gagal memproses permintaan. Payload tidak valid".to_string()
            }
            Self::InvalidQuery { .. } => {
                "Gagal memproses permintaan. Parameter query tidak valid".to_string()
            }
            Self::InvalidPath { .. } => {
                "Gagal memproses permintaan. Id buku tidak valid".to_string()
            }
            Self::Timeout { seconds } => format!(
                "Permintaan melebihi batas waktu {} detik",
                seconds
            ),
            Self::Internal { .. } => "Terjadi kesalahan pada server".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Internal { message } => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", message);
                json!({
                    "status": "error",
                    "message": self.message()
                })
            }
            Self::Timeout { seconds } => {
                tracing::warn!(seconds, "request timed out");
                json!({
                    "status": "error",
                    "message": self.message()
                })
            }
            Self::InvalidPayload { reason }
            | Self::InvalidQuery { reason }
            | Self::InvalidPath { reason } => {
                tracing::debug!(%reason, "rejected request");
                json!({
                    "status": "fail",
                    "message": self.message()
                })
            }
            _ => json!({
                "status": "fail",
                "message": self.message()
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

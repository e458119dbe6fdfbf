//! bookshelf-server: HTTP server over an in-memory book shelf
//!
//! Book records live in a single ordered [`store::Shelf`] held in process
//! memory. The [`http`] layer exposes create/list/get/update/delete over
//! JSON and maps store failures onto status codes and user-facing
//! messages.

pub mod http;
pub mod models;
pub mod store;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use store::{Shelf, StoreError};

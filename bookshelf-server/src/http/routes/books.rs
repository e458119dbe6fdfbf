//! Book endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::{ApiError, BookAction};
use crate::http::extractors::{BookIdPath, JsonPayload, ListQuery};
use crate::http::server::AppState;
use crate::models::{Book, BookFilter, BookId, BookInput, BookSummary};

/// Success envelope: `{status: "success", message?, data?}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Success<T> {
    fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data: Some(data),
        }
    }

    fn with_message(message: &'static str, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message),
            data: Some(data),
        }
    }
}

impl Success<()> {
    fn message(message: &'static str) -> Self {
        Self {
            status: "success",
            message: Some(message),
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedData {
    pub book_id: BookId,
}

#[derive(Debug, Serialize)]
pub struct BooksData {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookData {
    pub book: Book,
}

/// Raw listing query; flags are decoded by [`BookFilter::parse`]
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksParams {
    pub reading: Option<String>,
    pub finished: Option<String>,
    pub name: Option<String>,
}

/// POST /books - add a book
async fn add_book(
    State(state): State<Arc<AppState>>,
    JsonPayload(input): JsonPayload<BookInput>,
) -> Result<(StatusCode, Json<Success<CreatedData>>), ApiError> {
    let book_id = state
        .write()
        .await
        .create(input)
        .map_err(|e| ApiError::from_store(BookAction::Add, e))?;

    Ok((
        StatusCode::CREATED,
        Json(Success::with_message(
            "Buku berhasil ditambahkan",
            CreatedData { book_id },
        )),
    ))
}

/// GET /books - list books, optionally filtered
async fn list_books(
    State(state): State<Arc<AppState>>,
    ListQuery(params): ListQuery<ListBooksParams>,
) -> Result<Json<Success<BooksData>>, ApiError> {
    let filter = BookFilter::parse(
        params.reading.as_deref(),
        params.finished.as_deref(),
        params.name.as_deref(),
    )
    .map_err(|error| ApiError::Validation {
        action: BookAction::List,
        error,
    })?;

    let books = state
        .read()
        .await
        .list(&filter)
        .map_err(|e| ApiError::from_store(BookAction::List, e))?;

    Ok(Json(Success::data(BooksData { books })))
}

/// GET /books/{bookId} - get a single book
async fn get_book(
    State(state): State<Arc<AppState>>,
    BookIdPath(id): BookIdPath,
) -> Result<Json<Success<BookData>>, ApiError> {
    let book = state
        .read()
        .await
        .get(&id)
        .cloned()
        .map_err(|e| ApiError::from_store(BookAction::Fetch, e))?;

    Ok(Json(Success::data(BookData { book })))
}

/// PUT /books/{bookId} - replace a book's fields
async fn update_book(
    State(state): State<Arc<AppState>>,
    BookIdPath(id): BookIdPath,
    JsonPayload(input): JsonPayload<BookInput>,
) -> Result<Json<Success<()>>, ApiError> {
    state
        .write()
        .await
        .update(&id, input)
        .map_err(|e| ApiError::from_store(BookAction::Update, e))?;

    Ok(Json(Success::message("Buku berhasil diperbarui")))
}

/// DELETE /books/{bookId} - remove a book
async fn delete_book(
    State(state): State<Arc<AppState>>,
    BookIdPath(id): BookIdPath,
) -> Result<Json<Success<()>>, ApiError> {
    state
        .write()
        .await
        .delete(&id)
        .map_err(|e| ApiError::from_store(BookAction::Delete, e))?;

    Ok(Json(Success::message("Buku berhasil dihapus")))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route(
            "/books/{bookId}",
            get(get_book).put(update_book).delete(delete_book),
        )
}

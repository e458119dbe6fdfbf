//! Custom Axum extractors
//!
//! Rejections are turned into [`ApiError`] so malformed requests get the
//! same `{status, message}` envelope as every other failure.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body extractor with an `ApiError` rejection
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::InvalidPayload {
                reason: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Query string extractor with an `ApiError` rejection
pub struct ListQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ListQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| ApiError::InvalidQuery {
                reason: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Extract the `{bookId}` path segment
pub struct BookIdPath(pub String);

impl<S> FromRequestParts<S> for BookIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| ApiError::InvalidPath {
                reason: rejection.body_text(),
            })?;
        Ok(Self(id))
    }
}

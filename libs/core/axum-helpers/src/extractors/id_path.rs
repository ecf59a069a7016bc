//! Positive integer path parameter.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extracts a single path segment as a positive `i32` id.
///
/// Anything else (non-numeric, zero, negative, overflowing) is rejected with 400.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> impl IntoResponse { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl IdPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(AppError::InvalidId(format!(
                "'{raw}' is not a positive integer id"
            ))),
        }
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        IdPath::parse(&raw).map_err(IntoResponse::into_response)
    }
}

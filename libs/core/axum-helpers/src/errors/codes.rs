//! Stable error codes carried in every error body.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidArgument;
//! assert_eq!(code.as_str(), "INVALID_ARGUMENT");
//! assert_eq!(code.code(), 1003);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Client errors live in 1000-1999, storage errors in 2000-2999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    ValidationError,
    InvalidArgument,
    InvalidId,
    JsonExtraction,
    NotFound,
    MethodNotAllowed,
    InternalError,

    DatabaseError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidArgument => 1003,
            Self::JsonExtraction => 1004,
            Self::NotFound => 1005,
            Self::MethodNotAllowed => 1006,
            Self::InternalError => 1500,
            Self::DatabaseError => 2000,
        }
    }

    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::ValidationError => "Request validation failed",
            Self::InvalidArgument => "Invalid argument",
            Self::InvalidId => "Invalid identifier",
            Self::JsonExtraction => "Failed to parse JSON request body",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            // Storage failures never leak driver detail to clients.
            Self::DatabaseError => "A storage error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

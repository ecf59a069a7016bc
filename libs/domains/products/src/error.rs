use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, RuntimeErr, SqlxError};
use thiserror::Error;
use tracing::error;

/// SQLSTATE class for data exceptions (bad casts, out-of-range numbers, ...)
const DATA_EXCEPTION_CLASS: &str = "22";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Product {0} not found")]
    NotFound(i32),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Failed to decode product row: {0}")]
    Decode(String),

    #[error("Failed to publish image URLs: {0}")]
    Publish(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::Query(RuntimeErr::SqlxError(e)) | DbErr::Exec(RuntimeErr::SqlxError(e)) => {
                classify_sqlx(e).unwrap_or_else(|| ProductError::Persistence(err.to_string()))
            }
            DbErr::Type(_) | DbErr::TryIntoErr { .. } => {
                ProductError::Decode(err.to_string())
            }
            _ => ProductError::Persistence(err.to_string()),
        }
    }
}

/// Pick out driver errors that are not plain persistence failures.
fn classify_sqlx(err: &SqlxError) -> Option<ProductError> {
    match err {
        SqlxError::ColumnDecode { .. }
        | SqlxError::Decode(_)
        | SqlxError::ColumnNotFound(_)
        | SqlxError::TypeNotFound { .. } => Some(ProductError::Decode(err.to_string())),
        _ => {
            let db = err.as_database_error()?;
            let code = db.code()?;
            code.starts_with(DATA_EXCEPTION_CLASS)
                .then(|| ProductError::InvalidArgument(db.message().to_string()))
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {id} not found")),
            ProductError::Persistence(detail) => AppError::Database(detail),
            ProductError::Decode(detail) => {
                error!(detail = %detail, "Failed to decode stored product row");
                AppError::Database(detail)
            }
            // Neither is ever returned from a handler.
            ProductError::Publish(msg) | ProductError::Cache(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

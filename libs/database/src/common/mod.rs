//! Pieces shared by every backend

pub mod error;
pub mod health;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use health::HealthStatus;
pub use retry::{RetryConfig, retry, retry_with_backoff};

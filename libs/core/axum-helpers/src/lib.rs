//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog binaries.
//!
//! - [`errors`]: [`AppError`] and the standard JSON error body
//! - [`extractors`]: [`IdPath`] and [`ValidatedJson`]
//! - [`server`]: router assembly, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson};
pub use server::{
    HealthCheckFuture, HealthResponse, create_router, health_router, run_health_checks, serve,
    serve_with_shutdown, shutdown_signal,
};

//! Router assembly, health endpoints and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_router, health_router, serve};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes, None)?.merge(health_router(app_info!()));
//! serve(router, &server_config, Duration::from_secs(30), async { /* close pools */ }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, serve, serve_with_shutdown};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;

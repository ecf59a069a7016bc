//! Connection management for the catalog's backing stores.
//!
//! # Features
//!
//! - `postgres` (default): PostgreSQL pool through SeaORM
//! - `redis` (default): Redis `ConnectionManager`
//! - `config`: `core_config::FromEnv` implementations for the config structs
//!
//! ```ignore
//! use database::{postgres, redis};
//!
//! let db = postgres::connect_from_config_with_retry(pg_config, None).await?;
//! let conn = redis::connect_with_retry(&redis_config.url, None).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult, HealthStatus};

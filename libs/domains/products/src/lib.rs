//! Products Domain
//!
//! Create, list and fetch catalog products stored in PostgreSQL. Creating a product hands its
//! image URLs to the image-processing queue; a Redis cache is available alongside.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Service   │ ──▶ │  Publisher  │  ← Redis Stream
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │ Repository  │ ◀── │   Filter    │  ← predicate builder
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_products::{handlers, PgProductRepository, ProductService, RedisStreamPublisher};
//!
//! # async fn example(
//! #     db: sea_orm::DatabaseConnection,
//! #     redis: redis::aio::ConnectionManager,
//! # ) {
//! let repository = PgProductRepository::new(db);
//! let publisher = RedisStreamPublisher::new(redis, "image_processing");
//! let service = ProductService::new(repository, Arc::new(publisher));
//!
//! let router = handlers::router(service);
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod publisher;
pub mod repository;
pub mod service;

pub use cache::{ProductCache, RedisProductCache};
pub use error::{ProductError, ProductResult};
pub use filter::{Clause, Column, FilterQuery, Operator};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, Product, ProductFilter};
pub use postgres::PgProductRepository;
pub use publisher::{ImagePublisher, RedisStreamPublisher, DEFAULT_IMAGE_QUEUE};
pub use repository::ProductRepository;
pub use service::ProductService;

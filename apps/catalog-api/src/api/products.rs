//! Products API routes

use axum::Router;
use domain_products::{handlers, ProductRepository, ProductService};

pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    handlers::router(service)
}

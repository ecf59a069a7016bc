use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter};

/// Persistence boundary for products.
///
/// Implementations own the `products` rows; products are only ever inserted and read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with its assigned id.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Products matching `filter`, ordered by id. No match is an empty list.
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Fails with `NotFound` when no row exists and `InvalidArgument` when `id` is not positive.
    async fn get_by_id(&self, id: i32) -> ProductResult<Product>;
}

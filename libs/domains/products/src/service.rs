//! Product Service - orchestration of store, publisher and cache

use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::cache::ProductCache;
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter};
use crate::publisher::ImagePublisher;
use crate::repository::ProductRepository;

/// Coordinates one request across the repository, the image publisher and the cache.
///
/// The cache is held for callers that want it; the create, list and get flows read
/// straight from the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    publisher: Arc<dyn ImagePublisher>,
    cache: Option<Arc<dyn ProductCache>>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, publisher: Arc<dyn ImagePublisher>) -> Self {
        Self {
            repository: Arc::new(repository),
            publisher,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ProductCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&Arc<dyn ProductCache>> {
        self.cache.as_ref()
    }

    /// Validate, insert, then hand the images to the publisher.
    ///
    /// The insert decides the outcome. A publish failure is logged and the created
    /// product is still returned.
    #[instrument(skip(self, input), fields(product_name = %input.name, user_id = input.user_id))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = self.repository.create(input).await?;
        info!(product_id = product.id, "Product created");

        if !product.images.is_empty() {
            if let Err(e) = self.publisher.publish(&product.images).await {
                warn!(
                    product_id = product.id,
                    error = %e,
                    "Image publishing failed, product was still created"
                );
            }
        }

        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository.get_by_id(id).await
    }
}

//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use domain_products::{ProductRepository, ProductService};

/// Product routes under `/products`
pub fn routes<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new().nest("/products", products::router(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_products::{
        CreateProduct, ImagePublisher, Product, ProductError, ProductFilter, ProductResult,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct OneProduct;

    #[async_trait]
    impl ProductRepository for OneProduct {
        async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
            Ok(Product::from_create(1, input))
        }

        async fn list(&self, _filter: ProductFilter) -> ProductResult<Vec<Product>> {
            Ok(vec![self.get_by_id(1).await?])
        }

        async fn get_by_id(&self, id: i32) -> ProductResult<Product> {
            if id != 1 {
                return Err(ProductError::NotFound(id));
            }
            Ok(Product::from_create(
                1,
                CreateProduct {
                    user_id: 3,
                    name: "Lamp".to_string(),
                    description: None,
                    images: vec![],
                    price: 10.0,
                },
            ))
        }
    }

    struct NoQueue;

    #[async_trait]
    impl ImagePublisher for NoQueue {
        async fn publish(&self, _image_urls: &[String]) -> ProductResult<()> {
            Ok(())
        }
    }

    fn app() -> Router {
        let service = ProductService::new(OneProduct, Arc::new(NoQueue));
        axum_helpers::create_router::<ApiDoc>(routes(service), None).unwrap()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn lamp_is_created_then_fetched_by_id() {
        let body = json!({
            "user_id": 3,
            "product_name": "Lamp",
            "product_description": "Desk lamp",
            "product_images": ["https://cdn.example.com/lamp.jpg"],
            "product_price": 10.0
        });
        let response = app()
            .oneshot(
                Request::post("/products")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let created: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created["id"], 1);
        assert_eq!(created["compressed_product_images"], json!([]));

        let (status, fetched) = get(app(), "/products/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["product_name"], "Lamp");
        assert_eq!(fetched["compressed_product_images"], json!([]));
    }

    #[tokio::test]
    async fn list_is_served_at_products() {
        let (status, body) = get(app(), "/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["product_name"], "Lamp");
    }

    #[tokio::test]
    async fn api_prefix_is_not_served() {
        let (status, _) = get(app(), "/api/products").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_product_is_404() {
        let (status, _) = get(app(), "/products/2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let (status, _) = get(app(), "/products/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, body) = get(app(), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_object());
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = get(app(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Catalog API");
    }
}

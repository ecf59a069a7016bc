//! HTTP handlers for the product catalog

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    ErrorResponse, IdPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter};
use crate::repository::ProductRepository;
use crate::service::ProductService;

#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product),
    components(
        schemas(Product, CreateProduct, ErrorResponse),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Routes relative to the mount point: `/` and `/{id}`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
        .with_state(Arc::new(service))
}

/// List products matching the optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products ordered by id; empty when none match", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a product and queue its images for processing
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Positive product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::publisher::MockImagePublisher;
    use crate::repository::MockProductRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(repo: MockProductRepository, publisher: MockImagePublisher) -> Router {
        router(ProductService::new(repo, Arc::new(publisher)))
    }

    fn quiet_publisher() -> MockImagePublisher {
        let mut publisher = MockImagePublisher::new();
        publisher.expect_publish().returning(|_| Ok(()));
        publisher
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_with_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .returning(|input| Ok(Product::from_create(1, input)));

        let body = json!({
            "user_id": 1,
            "product_name": "Lamp",
            "product_description": "Desk lamp",
            "product_images": ["https://cdn.example.com/lamp.jpg"],
            "product_price": 19.99
        });
        let response = app(repo, quiet_publisher())
            .oneshot(post_json(&body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = json_body(response.into_body()).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["product_name"], "Lamp");
        assert_eq!(created["compressed_product_images"], json!([]));
    }

    #[tokio::test]
    async fn create_response_ignores_publish_failure() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .returning(|input| Ok(Product::from_create(2, input)));
        let mut publisher = MockImagePublisher::new();
        publisher
            .expect_publish()
            .returning(|_| Err(ProductError::Publish("broker down".into())));

        let body = json!({
            "user_id": 1,
            "product_name": "Lamp",
            "product_images": ["a.jpg"],
            "product_price": 5
        });
        let response = app(repo, publisher)
            .oneshot(post_json(&body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Product = json_body(response.into_body()).await;
        assert_eq!(created.id, 2);
        assert_eq!(created.images, vec!["a.jpg"]);
    }

    #[tokio::test]
    async fn malformed_bodies_are_400() {
        let bodies = [
            "{not json",
            r#"{"product_name": "Lamp", "product_price": 1}"#,
            r#"{"user_id": "one", "product_name": "Lamp", "product_price": 1}"#,
            r#"{"user_id": 1, "product_name": "", "product_price": 1}"#,
            r#"{"user_id": 1, "product_name": "Lamp", "product_price": -3}"#,
        ];

        for body in bodies {
            let mut repo = MockProductRepository::new();
            repo.expect_create().never();

            let response = app(repo, MockImagePublisher::new())
                .oneshot(post_json(body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_400() {
        let response = app(MockProductRepository::new(), MockImagePublisher::new())
            .oneshot(
                Request::post("/")
                    .body(Body::from(r#"{"user_id":1,"product_name":"Lamp","product_price":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_store_failure_is_500_without_detail() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .returning(|_| Err(ProductError::Persistence("password authentication failed".into())));

        let body = json!({"user_id": 1, "product_name": "Lamp", "product_price": 1});
        let response = app(repo, MockImagePublisher::new())
            .oneshot(post_json(&body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = json_body(response.into_body()).await;
        assert!(!error.message.contains("password"));
    }

    #[tokio::test]
    async fn list_forwards_query_parameters() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .withf(|filter| {
                filter.min_price.as_deref() == Some("10")
                    && filter.max_price.as_deref() == Some("20")
                    && filter.name_contains.as_deref() == Some("lamp")
                    && filter.user_id.is_none()
            })
            .returning(|_| Ok(vec![]));

        let response = app(repo, MockImagePublisher::new())
            .oneshot(
                Request::get("/?min_price=10&max_price=20&product_name=lamp")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let products: Vec<Product> = json_body(response.into_body()).await;
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn list_rejected_filter_is_400() {
        let mut repo = MockProductRepository::new();
        repo.expect_list().returning(|_| {
            Err(ProductError::InvalidArgument(
                "invalid input syntax for type numeric: \"cheap\"".into(),
            ))
        });

        let response = app(repo, MockImagePublisher::new())
            .oneshot(Request::get("/?min_price=cheap").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_returns_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|id| {
            Ok(Product {
                id,
                user_id: 1,
                name: "Lamp".into(),
                description: None,
                images: vec!["a.jpg".into()],
                compressed_images: vec![],
                price: 19.99,
            })
        });

        let response = app(repo, MockImagePublisher::new())
            .oneshot(Request::get("/12").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let product: Product = json_body(response.into_body()).await;
        assert_eq!(product.id, 12);
    }

    #[tokio::test]
    async fn get_non_numeric_id_is_400() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().never();

        let response = app(repo, MockImagePublisher::new())
            .oneshot(Request::get("/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_missing_product_is_404() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Err(ProductError::NotFound(id)));

        let response = app(repo, MockImagePublisher::new())
            .oneshot(Request::get("/999999").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(error.error, "NOT_FOUND");
    }
}

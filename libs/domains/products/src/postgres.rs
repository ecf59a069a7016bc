use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};
use tracing::{debug, instrument};

use crate::error::{ProductError, ProductResult};
use crate::filter::FilterQuery;
use crate::models::{CreateProduct, Product, ProductFilter};
use crate::repository::ProductRepository;

/// Price is NUMERIC in the table; it crosses the wire as float8.
const SELECT_PRODUCTS: &str = "SELECT id, user_id, product_name, product_description, \
     product_images, compressed_product_images, product_price::float8 AS product_price \
     FROM products";

const INSERT_PRODUCT: &str = "INSERT INTO products \
     (user_id, product_name, product_description, product_images, product_price) \
     VALUES ($1, $2, $3, $4, $5) RETURNING id";

/// PostgreSQL implementation of [`ProductRepository`] using SeaORM raw statements
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i32,
    user_id: i32,
    product_name: String,
    product_description: Option<String>,
    product_images: Option<Vec<String>>,
    compressed_product_images: Option<Vec<String>>,
    product_price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            user_id: row.user_id,
            name: row.product_name,
            description: row.product_description,
            images: row.product_images.unwrap_or_default(),
            compressed_images: row.compressed_product_images.unwrap_or_default(),
            price: row.product_price,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedId {
    id: i32,
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name, user_id = input.user_id))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            INSERT_PRODUCT,
            [
                input.user_id.into(),
                input.name.clone().into(),
                input.description.clone().into(),
                input.images.clone().into(),
                input.price.into(),
            ],
        );

        let inserted = InsertedId::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| ProductError::Persistence("INSERT returned no id".to_string()))?;

        debug!(product_id = inserted.id, "Product inserted");
        Ok(Product::from_create(inserted.id, input))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let query = FilterQuery::from_filter(&filter);
        let sql = format!("{SELECT_PRODUCTS} WHERE {} ORDER BY id", query.predicate);
        let values: Vec<Value> = query.args.into_iter().map(Value::from).collect();

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);
        let rows = ProductRow::find_by_statement(stmt).all(&self.db).await?;

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> ProductResult<Product> {
        if id <= 0 {
            return Err(ProductError::InvalidArgument(format!(
                "product id must be a positive integer, got {id}"
            )));
        }

        let sql = format!("{SELECT_PRODUCTS} WHERE id = $1");
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .map(Product::from)
            .ok_or(ProductError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr, Transaction};
    use std::collections::BTreeMap;

    fn row(id: i32, name: &str, price: f64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", Value::from(id)),
            ("user_id", Value::from(1i32)),
            ("product_name", Value::from(name.to_string())),
            ("product_description", Value::from(None::<String>)),
            ("product_images", Value::from(vec!["a.jpg".to_string(), "b.jpg".to_string()])),
            ("compressed_product_images", Value::from(Vec::<String>::new())),
            ("product_price", Value::from(price)),
        ])
    }

    fn lamp() -> CreateProduct {
        CreateProduct {
            user_id: 1,
            name: "Lamp".into(),
            description: Some("Desk lamp".into()),
            images: vec!["https://cdn.example.com/lamp.jpg".into()],
            price: 19.99,
        }
    }

    #[tokio::test]
    async fn create_returns_input_with_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(42i32))])]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.create(lamp()).await.unwrap();

        assert_eq!(product.id, 42);
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.images, vec!["https://cdn.example.com/lamp.jpg"]);
        assert!(product.compressed_images.is_empty());
    }

    #[tokio::test]
    async fn create_binds_every_column_but_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(1i32))])]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        repo.create(lamp()).await.unwrap();

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                INSERT_PRODUCT,
                [
                    1i32.into(),
                    "Lamp".into(),
                    Some("Desk lamp".to_string()).into(),
                    vec!["https://cdn.example.com/lamp.jpg".to_string()].into(),
                    19.99f64.into(),
                ],
            )]
        );
    }

    #[tokio::test]
    async fn create_failure_is_persistence_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal("connection reset".into()))])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.create(lamp()).await.unwrap_err();
        assert!(matches!(err, ProductError::Persistence(_)));
    }

    #[tokio::test]
    async fn list_renders_filter_into_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "Lamp", 15.0)]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        let filter = ProductFilter::default()
            .with_min_price("10")
            .with_max_price("20")
            .with_name_contains("lamp");
        let products = repo.list(filter).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].images, vec!["a.jpg", "b.jpg"]);

        let expected_sql = format!(
            "{SELECT_PRODUCTS} WHERE TRUE AND product_price >= $1::numeric \
             AND product_price <= $2::numeric AND product_name ILIKE $3 ORDER BY id"
        );
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                expected_sql,
                ["10".into(), "20".into(), "%lamp%".into()],
            )]
        );
    }

    #[tokio::test]
    async fn list_without_matches_is_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.list(ProductFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_maps_undecodable_row_to_decode_error() {
        let mut broken = row(1, "Lamp", 1.0);
        broken.insert("product_name", Value::from(None::<String>));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![broken]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.list(ProductFilter::default()).await.unwrap_err();
        assert!(matches!(err, ProductError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn get_by_id_returns_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(5, "Chair", 49.5)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.get_by_id(5).await.unwrap();
        assert_eq!(product.id, 5);
        assert_eq!(product.name, "Chair");
        assert_eq!(product.price, 49.5);
    }

    #[tokio::test]
    async fn get_by_id_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.get_by_id(999_999).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(999_999)));
    }

    #[tokio::test]
    async fn get_by_id_rejects_non_positive_id_without_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PgProductRepository::new(db.clone());

        let err = repo.get_by_id(0).await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidArgument(_)));
        assert!(db.into_transaction_log().is_empty());
    }
}

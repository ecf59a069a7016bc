//! Product domain models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A catalog product as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = 1)]
    pub user_id: i32,

    #[serde(rename = "product_name")]
    #[schema(example = "Lamp")]
    pub name: String,

    #[serde(rename = "product_description")]
    pub description: Option<String>,

    /// Original image URLs, in upload order
    #[serde(rename = "product_images", default)]
    pub images: Vec<String>,

    /// Filled in later by the image worker; empty right after creation
    #[serde(rename = "compressed_product_images", default)]
    pub compressed_images: Vec<String>,

    #[serde(rename = "product_price")]
    #[schema(example = 19.99)]
    pub price: f64,
}

impl Product {
    /// Assemble the product the store just inserted under `id`.
    pub fn from_create(id: i32, input: CreateProduct) -> Self {
        Self {
            id,
            user_id: input.user_id,
            name: input.name,
            description: input.description,
            images: input.images,
            compressed_images: Vec::new(),
            price: input.price,
        }
    }
}

/// Request body for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[schema(example = 1)]
    pub user_id: i32,

    #[serde(rename = "product_name")]
    #[validate(length(min = 1, message = "product_name must not be empty"))]
    #[schema(example = "Lamp")]
    pub name: String,

    #[serde(rename = "product_description", default)]
    #[schema(example = "Desk lamp")]
    pub description: Option<String>,

    #[serde(rename = "product_images", default)]
    #[schema(example = json!(["https://cdn.example.com/lamp.jpg"]))]
    pub images: Vec<String>,

    #[serde(rename = "product_price")]
    #[validate(range(min = 0.0, message = "product_price must not be negative"))]
    #[schema(example = 19.99)]
    pub price: f64,
}

/// Optional listing criteria, taken verbatim from the query string.
///
/// Values stay text until the database casts them; a malformed number is rejected there.
/// An empty value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact owner id
    pub user_id: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<String>,

    /// Inclusive upper price bound
    pub max_price: Option<String>,

    /// Case-insensitive substring of the product name
    #[serde(rename = "product_name")]
    pub name_contains: Option<String>,
}

impl ProductFilter {
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_min_price(mut self, min_price: impl Into<String>) -> Self {
        self.min_price = Some(min_price.into());
        self
    }

    pub fn with_max_price(mut self, max_price: impl Into<String>) -> Self {
        self.max_price = Some(max_price.into());
        self
    }

    pub fn with_name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }
}

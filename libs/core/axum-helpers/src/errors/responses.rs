//! OpenAPI response components matching [`ErrorResponse`] bodies.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Malformed body, failed validation or rejected argument",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "product_name": [{ "code": "length", "message": null, "params": { "min": 1, "value": "" } }]
        }
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "NOT_FOUND",
        "message": "Product 42 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Storage or internal failure; detail is logged server-side only",
    content_type = "application/json",
    example = json!({
        "code": 2000,
        "error": "DATABASE_ERROR",
        "message": "A storage error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

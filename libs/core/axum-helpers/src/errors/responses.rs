//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - an upstream stage failed",
    content_type = "application/json",
    example = json!({
        "code": 3001,
        "error": "Failed to generate embedding",
        "details": "OpenAI API error (429 Too Many Requests): quota exceeded"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - required field missing or malformed",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "user_context field is required in body"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Method Not Allowed",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "error": "Method not allowed"
    })
)]
pub struct MethodNotAllowedResponse(pub ErrorResponse);


use axum::Json;
use serde::Serialize;

use crate::common::ApiError;

#[derive(Serialize)]
pub struct SuccessResponse {
    success: bool,
}

pub async fn index_handler() -> Json<SuccessResponse> {
    Json(SuccessResponse { success: true })
}

/// Any route that does not exist
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

/// Known route, unsupported method
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::config::StorageBackend;
use crate::presentation::http::dto::{ApiResponse, HealthResponseDto};

pub fn health_routes(storage: StorageBackend) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(move || health_handler(storage)))
}

async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success("물어보SHOO knowledge base".to_string())),
    )
}

async fn health_handler(storage: StorageBackend) -> impl IntoResponse {
    let health_response = HealthResponseDto {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.as_str().to_string(),
    };

    (StatusCode::OK, Json(ApiResponse::success(health_response)))
}

//! Health check and greeting handlers.

use axum::{response::IntoResponse, Json};

use crate::types::{HealthResponse, MessageResponse};

/// Root endpoint.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Backend is running", body = MessageResponse)
    )
)]
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse::new("StyleAura backend is running"))
}

/// Greeting used by the storefront to check API wiring.
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "health",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse)
    )
)]
pub async fn hello() -> impl IntoResponse {
    Json(MessageResponse::new("Hello from the backend API!"))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

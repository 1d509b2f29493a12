//! HTTP handlers for the StyleAura REST API.
//!
//! This module organizes handlers by domain:
//! - `health`: Liveness and greeting endpoints
//! - `diagnostics`: Store connectivity report
//! - `seed`: Catalog seeding
//! - `products`: Product listing and lookup

pub mod diagnostics;
pub mod health;
pub mod products;
pub mod seed;

pub use diagnostics::diagnostics;
pub use health::{health_check, hello, root};
pub use products::{get_product, list_products};
pub use seed::seed_products;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use styleaura_core::Error;

use crate::types::ErrorResponse;

/// HTTP status for a catalog error.
#[must_use]
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidLimit { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        Error::StoreUnavailable(_)
        | Error::Write(_)
        | Error::Config(_)
        | Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a catalog error as a JSON error response.
pub fn error_response(err: &Error) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!(code = err.code(), error = %err, "Request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
        .into_response()
}

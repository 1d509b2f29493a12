//! Product listing and lookup handlers.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use styleaura_core::PageLimit;

use super::error_response;
use crate::types::{ErrorResponse, ListProductsParams};
use crate::AppState;

/// List products matching the given filters.
///
/// Filters combine with AND; an absent filter places no constraint.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Matching products", body = Object),
        (status = 422, description = "Limit out of range", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListProductsParams>,
) -> impl IntoResponse {
    let limit = match params.limit {
        Some(value) => match PageLimit::within(value, state.max_limit) {
            Ok(limit) => limit,
            Err(e) => return error_response(&e),
        },
        None => state.default_limit,
    };

    match state.catalog.list(&params.to_filter(), limit).await {
        Ok(products) => Json(products).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Get a product by identifier.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product identifier (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product found", body = Object),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.get_by_id(&id).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => error_response(&e),
    }
}

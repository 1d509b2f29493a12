//! Store diagnostics handler.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::AppState;

/// Reports whether the document store is configured and reachable.
///
/// Always answers 200; failures are described in the body.
#[utoipa::path(
    get,
    path = "/test",
    tag = "health",
    responses(
        (status = 200, description = "Store diagnostics", body = Object)
    )
)]
pub async fn diagnostics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.diagnostics().await)
}

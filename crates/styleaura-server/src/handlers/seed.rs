//! Catalog seeding handler.

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use styleaura_core::{sample_products, Error, ProductRecord};

use super::error_response;
use crate::types::{ErrorResponse, SeedRequest, SeedResponse};
use crate::AppState;

/// Insert products into the catalog.
///
/// Without a body (or without `products`) the built-in sample catalog is
/// inserted. The body is read as JSON whatever its content type. Seeding is
/// not idempotent.
#[utoipa::path(
    post,
    path = "/seed",
    tag = "products",
    request_body(content = SeedRequest, description = "Products to insert (optional)"),
    responses(
        (status = 200, description = "Products inserted", body = SeedResponse),
        (status = 400, description = "Body is not a seed request", body = ErrorResponse),
        (status = 500, description = "Store unavailable or insert failed", body = ErrorResponse)
    )
)]
pub async fn seed_products(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let records = match seed_records(&body) {
        Ok(records) => records,
        Err(e) => {
            let err = Error::Serialization(format!("Invalid seed body: {e}"));
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                    code: err.code().to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.catalog.seed(records).await {
        Ok(ids) => Json(SeedResponse {
            inserted: ids.iter().map(ToString::to_string).collect(),
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Products named by a seed body; an empty body or `null` means the samples.
fn seed_records(body: &[u8]) -> Result<Vec<ProductRecord>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(sample_products());
    }
    let request: Option<SeedRequest> = serde_json::from_slice(body)?;
    Ok(request
        .and_then(|req| req.products)
        .unwrap_or_else(sample_products))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_records_empty_body_is_samples() {
        assert_eq!(seed_records(b"").unwrap().len(), 3);
        assert_eq!(seed_records(b"  \n").unwrap().len(), 3);
        assert_eq!(seed_records(b"null").unwrap().len(), 3);
        assert_eq!(seed_records(b"{}").unwrap().len(), 3);
    }

    #[test]
    fn test_seed_records_explicit_products() {
        let records = seed_records(br#"{"products": [{"title": "Tee"}]}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Tee"));

        assert!(seed_records(br#"{"products": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_seed_records_rejects_malformed_json() {
        assert!(seed_records(b"{\"products\": [").is_err());
        assert!(seed_records(br#"{"products": "all"}"#).is_err());
    }
}

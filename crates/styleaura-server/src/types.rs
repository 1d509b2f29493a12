//! Request/Response types for the StyleAura REST API.

use serde::{Deserialize, Serialize};
use styleaura_core::{ProductFilter, ProductRecord};
use utoipa::{IntoParams, ToSchema};

// ============================================================================
// General Types
// ============================================================================

/// Plain message body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    #[schema(example = "StyleAura backend is running")]
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Machine-readable error code (e.g. "CATALOG-003").
    #[schema(example = "CATALOG-003")]
    pub code: String,
}

// ============================================================================
// Product Types
// ============================================================================

/// Query parameters for product listing. Every parameter is optional.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// Exact category label.
    #[param(example = "Men")]
    pub category: Option<String>,
    /// Inclusive lower price bound.
    #[param(example = 50.0)]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    #[param(example = 100.0)]
    pub max_price: Option<f64>,
    /// Size the product must be offered in.
    #[param(example = "M")]
    pub size: Option<String>,
    /// Color the product must be offered in.
    #[param(example = "Blue")]
    pub color: Option<String>,
    /// Case-insensitive text searched in title, description and tags.
    #[param(example = "denim")]
    pub q: Option<String>,
    /// Maximum number of products, 1 to 200 (default 50).
    #[param(example = 50)]
    pub limit: Option<i64>,
}

impl ListProductsParams {
    /// Builds the filter described by these parameters.
    #[must_use]
    pub fn to_filter(&self) -> ProductFilter {
        let mut filter = ProductFilter::new();
        if let Some(category) = &self.category {
            filter = filter.with_category(category.as_str());
        }
        if let Some(min) = self.min_price {
            filter = filter.with_min_price(min);
        }
        if let Some(max) = self.max_price {
            filter = filter.with_max_price(max);
        }
        if let Some(size) = &self.size {
            filter = filter.with_size(size.as_str());
        }
        if let Some(color) = &self.color {
            filter = filter.with_color(color.as_str());
        }
        if let Some(q) = &self.q {
            filter = filter.with_query(q.as_str());
        }
        filter
    }
}

/// Request to seed the catalog.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SeedRequest {
    /// Products to insert. The built-in sample catalog is used when absent.
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub products: Option<Vec<ProductRecord>>,
}

/// Response from seeding.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    /// Identifiers of the inserted products, in insertion order.
    #[schema(example = json!(["507f1f77bcf86cd799439011"]))]
    pub inserted: Vec<String>,
}

// ============================================================================
// Health Types
// ============================================================================

/// Liveness response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process answers.
    pub status: String,
    /// Server version.
    pub version: String,
}

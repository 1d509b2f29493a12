#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]
#![allow(clippy::needless_for_each)]
//! `StyleAura` Server - REST API library for the StyleAura product catalog.
//!
//! This module provides the HTTP handlers, types and router for the catalog
//! REST API.
//!
//! ## OpenAPI Documentation
//!
//! The API is documented using OpenAPI 3.0. Access the interactive documentation at:
//! - Swagger UI: `GET /swagger-ui`
//! - OpenAPI JSON: `GET /api-docs/openapi.json`

mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use styleaura_core::{CatalogConfig, CatalogService, PageLimit};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Re-export types for external use
pub use types::*;

// Re-export handlers for routing
pub use handlers::{
    diagnostics, error_response, get_product, health_check, hello, list_products, root,
    seed_products, status_for,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

/// StyleAura API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StyleAura API",
        version = "0.1.0",
        description = "Product catalog backend for the StyleAura storefront. \
            Lists products with composable filters over a document store.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and diagnostics"),
        (name = "products", description = "Product catalog")
    ),
    paths(
        handlers::health::root,
        handlers::health::hello,
        handlers::health::health_check,
        handlers::diagnostics::diagnostics,
        handlers::seed::seed_products,
        handlers::products::list_products,
        handlers::products::get_product
    ),
    components(
        schemas(
            MessageResponse,
            HealthResponse,
            SeedRequest,
            SeedResponse,
            ErrorResponse
        )
    )
)]
pub struct ApiDoc;

// ============================================================================
// Application State
// ============================================================================

/// Application state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    /// The catalog service.
    pub catalog: CatalogService,
    /// Limit applied when a listing gives none.
    pub default_limit: PageLimit,
    /// Largest limit a listing may ask for.
    pub max_limit: usize,
}

impl AppState {
    /// Creates state with the default listing limits.
    #[must_use]
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog,
            default_limit: PageLimit::default(),
            max_limit: PageLimit::MAX,
        }
    }

    /// Applies the listing limits from the catalog configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default limit is out of range.
    pub fn with_limits(mut self, config: &CatalogConfig) -> styleaura_core::Result<Self> {
        let default = i64::try_from(config.default_limit).unwrap_or(i64::MAX);
        self.default_limit = PageLimit::within(default, config.max_limit)?;
        self.max_limit = config.max_limit.clamp(PageLimit::MIN, PageLimit::MAX);
        Ok(self)
    }
}

// ============================================================================
// Router
// ============================================================================

/// Builds the application router: API routes, Swagger UI and middleware.
pub fn build_router(state: Arc<AppState>, cors_enabled: bool) -> Router {
    let api_router = Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/health", get(health_check))
        .route("/test", get(diagnostics))
        .route("/seed", post(seed_products))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .with_state(state);

    // Swagger UI (stateless router)
    let swagger_ui =
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    let app = api_router.merge(Router::<()>::new().merge(swagger_ui));
    let app = if cors_enabled {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };
    app.layer(TraceLayer::new_for_http())
}

// ============================================================================
// Tests
// ============================================================================

#![allow(clippy::doc_markdown)]
//! Integration tests for the StyleAura REST API.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use styleaura_core::{CatalogService, MemoryStore, StoreConfig};
use styleaura_server::{build_router, AppState};

/// Helper to create a test app backed by an in-memory store
fn create_test_app() -> Router {
    let catalog = CatalogService::new(Some(Arc::new(MemoryStore::new("shop"))));
    build_router(Arc::new(AppState::new(catalog)), true)
}

/// Helper to create a test app with no store configured
fn create_storeless_app() -> Router {
    build_router(Arc::new(AppState::new(CatalogService::new(None))), true)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("Invalid JSON")
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

fn post_raw(uri: &str, content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", content_type)
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn seed_samples(app: &Router) -> Vec<String> {
    let (status, json) = send(app, post_empty("/seed")).await;
    assert_eq!(status, StatusCode::OK);
    json["inserted"]
        .as_array()
        .expect("inserted array")
        .iter()
        .map(|v| v.as_str().expect("string id").to_string())
        .collect()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_root_and_hello() {
    let app = create_test_app();

    let (status, json) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"message": "StyleAura backend is running"}));

    let (status, json) = send(&app, get("/api/hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"message": "Hello from the backend API!"}));
}

#[tokio::test]
async fn test_health_check() {
    let (status, json) = send(&create_test_app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_diagnostics_with_store() {
    let app = create_test_app();
    seed_samples(&app).await;

    let (status, json) = send(&app, get("/test")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["store_configured"], true);
    assert_eq!(json["reachable"], true);
    assert_eq!(json["database_name"], "shop");
    assert_eq!(json["collections"], json!(["clothingproduct"]));
}

#[tokio::test]
async fn test_diagnostics_without_store() {
    let (status, json) = send(&create_storeless_app(), get("/test")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["store_configured"], false);
    assert_eq!(json["database_url_set"], false);
    assert_eq!(json["database_name_set"], false);
    assert_eq!(json["collections"], json!([]));
}

#[tokio::test]
async fn test_diagnostics_reports_supplied_settings() {
    // Arrange
    let settings = StoreConfig {
        url: Some("mongodb://localhost:27017".to_string()),
        ..Default::default()
    };
    let catalog = CatalogService::new(None).with_settings(&settings);
    let app = build_router(Arc::new(AppState::new(catalog)), true);

    // Act
    let (status, json) = send(&app, get("/test")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["store_configured"], false);
    assert_eq!(json["database_url_set"], true);
    assert_eq!(json["database_name_set"], false);
}

// ============================================================================
// Seed
// ============================================================================

#[tokio::test]
async fn test_seed_without_body_inserts_samples() {
    let app = create_test_app();

    let ids = seed_samples(&app).await;

    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.len() == 24));
}

#[tokio::test]
async fn test_seed_with_products() {
    // Arrange
    let app = create_test_app();
    let body = json!({"products": [
        {"title": "Tee", "price": 12, "category": "Men"},
        {"title": "Scarf", "price": 30, "category": "Accessories", "material": "wool"}
    ]});

    // Act
    let (status, json) = send(&app, post_json("/seed", &body)).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let ids = json["inserted"].as_array().unwrap();
    assert_eq!(ids.len(), 2);

    let scarf_uri = format!("/products/{}", ids[1].as_str().unwrap());
    let (status, scarf) = send(&app, get(&scarf_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scarf["title"], "Scarf");
    assert_eq!(scarf["material"], "wool");
}

#[tokio::test]
async fn test_seed_json_content_type_with_empty_body_inserts_samples() {
    let app = create_test_app();

    let (status, json) = send(&app, post_raw("/seed", "application/json", "")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["inserted"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_seed_ignores_content_type() {
    let app = create_test_app();

    let (status, json) = send(&app, post_raw("/seed", "text/plain", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["inserted"].as_array().unwrap().len(), 3);

    let body = r#"{"products": [{"title": "Tee"}]}"#;
    let (status, json) = send(&app, post_raw("/seed", "text/plain", body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["inserted"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_seed_malformed_body_is_bad_request() {
    let app = create_test_app();

    let (status, json) = send(&app, post_raw("/seed", "application/json", "{\"products\": [")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CATALOG-008");
    let (_, listed) = send(&app, get("/products")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_seed_keeps_mistyped_fields_verbatim() {
    // Arrange
    let app = create_test_app();
    let body = json!({"products": [
        {"title": "Tee", "price": "12.50", "sizes": "M", "in_stock": "yes"}
    ]});

    // Act
    let (status, json) = send(&app, post_json("/seed", &body)).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let id = json["inserted"][0].as_str().unwrap().to_string();
    let (status, tee) = send(&app, get(&format!("/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tee["price"], "12.50");
    assert_eq!(tee["sizes"], "M");
    assert_eq!(tee["in_stock"], "yes");
}

#[tokio::test]
async fn test_seed_twice_duplicates() {
    let app = create_test_app();
    seed_samples(&app).await;
    seed_samples(&app).await;

    let (_, json) = send(&app, get("/products")).await;
    assert_eq!(json.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_seed_without_store_is_server_error() {
    let (status, json) = send(&create_storeless_app(), post_empty("/seed")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "CATALOG-001");
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_all_products() {
    let app = create_test_app();
    let ids = seed_samples(&app).await;

    let (status, json) = send(&app, get("/products")).await;

    assert_eq!(status, StatusCode::OK);
    let products = json.as_array().unwrap();
    assert_eq!(products.len(), 3);
    let listed: Vec<&str> = products
        .iter()
        .map(|p| p["_id"].as_str().expect("string id"))
        .collect();
    assert_eq!(listed, ids.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_list_with_combined_filters() {
    let app = create_test_app();
    seed_samples(&app).await;

    let (status, json) = send(
        &app,
        get("/products?category=Men&min_price=50&max_price=100&size=M&color=Blue&q=denim"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let products = json.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["title"], "Men's Classic Denim Jacket");
}

#[tokio::test]
async fn test_list_price_bounds_are_inclusive() {
    let app = create_test_app();
    seed_samples(&app).await;

    let (_, json) = send(&app, get("/products?min_price=49&max_price=64.5")).await;

    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Women's Linen Summer Dress", "Unisex Oversized Hoodie"]
    );
}

#[tokio::test]
async fn test_list_empty_params_are_ignored() {
    let app = create_test_app();
    seed_samples(&app).await;

    let (status, json) = send(&app, get("/products?category=&q=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_respects_limit() {
    let app = create_test_app();
    seed_samples(&app).await;

    let (status, json) = send(&app, get("/products?limit=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_limit_out_of_range() {
    let app = create_test_app();

    for uri in ["/products?limit=0", "/products?limit=201", "/products?limit=-1"] {
        let (status, json) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(json["code"], "CATALOG-005");
    }
}

#[tokio::test]
async fn test_list_no_match_is_empty_array() {
    let app = create_test_app();
    seed_samples(&app).await;

    let (status, json) = send(&app, get("/products?color=Purple")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_list_without_store_is_empty() {
    let (status, json) = send(&create_storeless_app(), get("/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

// ============================================================================
// Get by id
// ============================================================================

#[tokio::test]
async fn test_get_product_by_id() {
    let app = create_test_app();
    let ids = seed_samples(&app).await;

    let (status, json) = send(&app, get(&format!("/products/{}", ids[2]))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["_id"], ids[2].as_str());
    assert_eq!(json["title"], "Unisex Oversized Hoodie");
    assert_eq!(json["sizes"], json!(["S", "M", "L", "XL"]));
}

#[tokio::test]
async fn test_get_product_invalid_id() {
    let (status, json) = send(&create_test_app(), get("/products/not-an-id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CATALOG-003");
}

#[tokio::test]
async fn test_get_product_not_found() {
    let app = create_test_app();
    seed_samples(&app).await;

    let (status, json) = send(&app, get("/products/507f1f77bcf86cd799439011")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "CATALOG-004");
}

#[tokio::test]
async fn test_get_product_without_store() {
    let (status, json) = send(
        &create_storeless_app(),
        get("/products/507f1f77bcf86cd799439011"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "CATALOG-001");
}

// ============================================================================
// Documentation
// ============================================================================

#[tokio::test]
async fn test_openapi_json_served() {
    let (status, json) = send(&create_test_app(), get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["info"]["title"], "StyleAura API");
}

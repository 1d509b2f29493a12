//! Tests for `filter` module

use super::filter::*;

#[test]
fn test_new_filter_is_empty() {
    let filter = ProductFilter::new();
    assert!(filter.is_empty());
    assert_eq!(filter, ProductFilter::default());
}

#[test]
fn test_builders_set_criteria() {
    // Arrange & Act
    let filter = ProductFilter::new()
        .with_category("Men")
        .with_min_price(10.0)
        .with_max_price(99.5)
        .with_size("M")
        .with_color("Blue")
        .with_query("denim");

    // Assert
    assert_eq!(filter.category(), Some("Men"));
    assert_eq!(filter.min_price(), Some(10.0));
    assert_eq!(filter.max_price(), Some(99.5));
    assert_eq!(filter.size(), Some("M"));
    assert_eq!(filter.color(), Some("Blue"));
    assert_eq!(filter.query(), Some("denim"));
    assert!(!filter.is_empty());
}

#[test]
fn test_empty_strings_count_as_absent() {
    let filter = ProductFilter::new()
        .with_category("")
        .with_size("")
        .with_color("")
        .with_query("");
    assert!(filter.is_empty());
}

#[test]
fn test_zero_price_is_a_real_bound() {
    let filter = ProductFilter::new().with_min_price(0.0);
    assert_eq!(filter.min_price(), Some(0.0));
}

#[test]
fn test_non_finite_prices_count_as_absent() {
    let filter = ProductFilter::new()
        .with_min_price(f64::NAN)
        .with_max_price(f64::INFINITY);
    assert!(filter.min_price().is_none());
    assert!(filter.max_price().is_none());
    assert!(filter.is_empty());
}

#[test]
fn test_later_builder_call_replaces_earlier() {
    let filter = ProductFilter::new().with_color("Red").with_color("Blue");
    assert_eq!(filter.color(), Some("Blue"));
}

#[test]
fn test_deserialize_from_json() {
    // Arrange
    let json = r#"{"category":"Women","max_price":70}"#;

    // Act
    let filter: ProductFilter = serde_json::from_str(json).expect("deserialize");

    // Assert
    assert_eq!(filter.category(), Some("Women"));
    assert_eq!(filter.max_price(), Some(70.0));
    assert!(filter.size().is_none());
}

//! Product filter criteria.
//!
//! A [`ProductFilter`] is an immutable set of optional criteria. Every field
//! is independent and an absent field places no constraint on the result:
//! leaving criteria out only ever widens a listing.
//!
//! ```rust,ignore
//! use styleaura_core::ProductFilter;
//!
//! let filter = ProductFilter::new()
//!     .with_category("Men")
//!     .with_min_price(50.0)
//!     .with_query("denim");
//! ```

use serde::{Deserialize, Serialize};

/// Optional search criteria over the product catalog.
///
/// Text criteria given as empty strings count as absent. Price bounds must be
/// finite; a non-finite bound counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    q: Option<String>,
}

impl ProductFilter {
    /// Creates an empty filter (matches every product).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to an exact category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category.into());
        self
    }

    /// Sets the inclusive lower price bound.
    #[must_use]
    pub fn with_min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price).filter(|p| p.is_finite());
        self
    }

    /// Sets the inclusive upper price bound.
    #[must_use]
    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price).filter(|p| p.is_finite());
        self
    }

    /// Requires the size list to contain this label.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = non_empty(size.into());
        self
    }

    /// Requires the color list to contain this label.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = non_empty(color.into());
        self
    }

    /// Free-text search over title, description and tags (case-insensitive).
    #[must_use]
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = non_empty(q.into());
        self
    }

    /// Category criterion.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }

    /// Lower price bound.
    #[must_use]
    pub fn min_price(&self) -> Option<f64> {
        self.min_price.filter(|p| p.is_finite())
    }

    /// Upper price bound.
    #[must_use]
    pub fn max_price(&self) -> Option<f64> {
        self.max_price.filter(|p| p.is_finite())
    }

    /// Size criterion.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref().filter(|s| !s.is_empty())
    }

    /// Color criterion.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref().filter(|s| !s.is_empty())
    }

    /// Free-text criterion.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns true when no criterion is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category().is_none()
            && self.min_price().is_none()
            && self.max_price().is_none()
            && self.size().is_none()
            && self.color().is_none()
            && self.query().is_none()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

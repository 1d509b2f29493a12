//! Composite queries and the filter-to-query builder.
//!
//! A [`CompositeQuery`] is a conjunction of [`Clause`]s. It is store
//! agnostic: each [`DocumentStore`](crate::store::DocumentStore) lowers it to
//! its own native representation, and [`CompositeQuery::matches`] evaluates
//! it directly against a JSON document for stores that filter in process.
//!
//! ## Building
//!
//! ```rust,ignore
//! use styleaura_core::{query, ProductFilter};
//!
//! let filter = ProductFilter::new().with_category("Men").with_min_price(50.0);
//! let q = query::build(&filter);
//! assert_eq!(q.clauses().len(), 2);
//! ```
//!
//! ## Matching semantics
//!
//! Clauses follow document-store conventions for list-valued fields: an
//! exact, range or substring clause against a list matches when any element
//! matches. A clause against a missing field never matches.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::ProductFilter;
use crate::product::fields;
use crate::store::Document;

/// Fields searched by free-text queries.
pub const TEXT_SEARCH_FIELDS: [&str; 3] = [fields::TITLE, fields::DESCRIPTION, fields::TAGS];

/// A single constraint on a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Clause {
    /// field == value
    Exact {
        /// Field name (dot notation for nested fields).
        field: String,
        /// Value to compare against.
        value: Value,
    },
    /// min <= field <= max, each bound optional.
    Range {
        /// Field name.
        field: String,
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// The list-valued field contains value.
    MembershipIn {
        /// Field name.
        field: String,
        /// Value that must appear in the list.
        value: Value,
    },
    /// Case-insensitive substring match.
    Contains {
        /// Field name.
        field: String,
        /// Substring to look for. Matched literally.
        needle: String,
    },
    /// Logical OR of nested clauses.
    AnyOf {
        /// Alternatives.
        clauses: Vec<Clause>,
    },
}

impl Clause {
    /// Creates an exact-match clause.
    #[must_use]
    pub fn exact(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Exact {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a range clause. Returns `None` when both bounds are absent,
    /// so a range never carries sentinel bounds.
    #[must_use]
    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self::Range {
            field: field.into(),
            min,
            max,
        })
    }

    /// Creates a list-membership clause.
    #[must_use]
    pub fn membership_in(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::MembershipIn {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a case-insensitive substring clause.
    #[must_use]
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Creates a disjunction.
    #[must_use]
    pub fn any_of(clauses: Vec<Clause>) -> Self {
        Self::AnyOf { clauses }
    }

    /// The field this clause constrains, if it constrains exactly one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Exact { field, .. }
            | Self::Range { field, .. }
            | Self::MembershipIn { field, .. }
            | Self::Contains { field, .. } => Some(field),
            Self::AnyOf { .. } => None,
        }
    }

    /// Evaluates the clause against a document.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Exact { field, value } => get_field(doc, field).is_some_and(|v| {
                values_equal(v, value) || any_element(v, |e| values_equal(e, value))
            }),
            Self::Range { field, min, max } => get_field(doc, field).is_some_and(|v| {
                let in_range = |e: &Value| {
                    e.as_f64().is_some_and(|n| {
                        min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)
                    })
                };
                in_range(v) || any_element(v, in_range)
            }),
            Self::MembershipIn { field, value } => get_field(doc, field).is_some_and(|v| {
                values_equal(v, value) || any_element(v, |e| values_equal(e, value))
            }),
            Self::Contains { field, needle } => {
                let needle = needle.to_lowercase();
                get_field(doc, field).is_some_and(|v| {
                    let hit = |e: &Value| e.as_str().is_some_and(|s| s.to_lowercase().contains(&needle));
                    hit(v) || any_element(v, hit)
                })
            }
            Self::AnyOf { clauses } => clauses.iter().any(|c| c.matches(doc)),
        }
    }
}

/// A conjunction of clauses. Empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeQuery {
    clauses: Vec<Clause>,
}

impl CompositeQuery {
    /// The universal query.
    #[must_use]
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Adds a clause to the conjunction.
    #[must_use]
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// The ANDed clauses.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if this query places no constraint.
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Looks up the clause constraining `field`.
    #[must_use]
    pub fn clause_for(&self, field: &str) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.field() == Some(field))
    }

    /// The disjunction clause, if any.
    #[must_use]
    pub fn any_of(&self) -> Option<&[Clause]> {
        self.clauses.iter().find_map(|c| match c {
            Clause::AnyOf { clauses } => Some(clauses.as_slice()),
            _ => None,
        })
    }

    /// Evaluates the query against a document.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|c| c.matches(doc))
    }
}

impl From<&ProductFilter> for CompositeQuery {
    fn from(filter: &ProductFilter) -> Self {
        build(filter)
    }
}

/// Translates a product filter into a composite query.
///
/// Each active criterion contributes one clause and all clauses are ANDed:
///
/// - category: exact match on `category`
/// - price bounds: one inclusive range on `price` holding only the bounds given
/// - size / color: membership in `sizes` / `colors`
/// - free text: case-insensitive substring match on any of `title`,
///   `description`, `tags`
///
/// An empty filter yields [`CompositeQuery::match_all`].
#[must_use]
pub fn build(filter: &ProductFilter) -> CompositeQuery {
    let mut query = CompositeQuery::match_all();

    if let Some(category) = filter.category() {
        query = query.and(Clause::exact(fields::CATEGORY, category));
    }
    if let Some(range) = Clause::range(fields::PRICE, filter.min_price(), filter.max_price()) {
        query = query.and(range);
    }
    if let Some(size) = filter.size() {
        query = query.and(Clause::membership_in(fields::SIZES, size));
    }
    if let Some(color) = filter.color() {
        query = query.and(Clause::membership_in(fields::COLORS, color));
    }
    if let Some(text) = filter.query() {
        let alternatives = TEXT_SEARCH_FIELDS
            .iter()
            .map(|field| Clause::contains(*field, text))
            .collect();
        query = query.and(Clause::any_of(alternatives));
    }

    query
}

/// Gets a field from a document, supporting dot notation for nested fields.
fn get_field<'a>(doc: &'a Document, field: &str) -> Option<&'a Value> {
    let mut parts = field.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}

fn any_element(value: &Value, pred: impl Fn(&Value) -> bool) -> bool {
    value.as_array().is_some_and(|items| items.iter().any(pred))
}

/// Compares two JSON values for equality, numbers by value.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .zip(b.as_f64())
            .is_some_and(|(a, b)| (a - b).abs() < f64::EPSILON),
        _ => a == b,
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;

//! Lowering of composite queries to MongoDB filter documents.
//!
//! Shared by the driver and Data API stores:
//!
//! | clause            | filter                                          |
//! |-------------------|-------------------------------------------------|
//! | `Exact`           | `{f: v}`                                        |
//! | `Range`           | `{f: {"$gte": min, "$lte": max}}` (bounds given) |
//! | `MembershipIn`    | `{f: {"$in": [v]}}`                             |
//! | `Contains`        | `{f: {"$regex": <escaped>, "$options": "i"}}`   |
//! | `AnyOf`           | `{"$or": [...]}`                                |

use serde_json::Value;
use std::collections::HashSet;

use super::Document;
use crate::query::{Clause, CompositeQuery};

/// Lowers a composite query to a MongoDB filter document.
///
/// Clauses are merged into one object. If two clauses would claim the same
/// key, the clauses are wrapped in `$and` instead.
#[must_use]
pub fn to_filter_document(query: &CompositeQuery) -> Value {
    let lowered: Vec<Document> = query.clauses().iter().map(lower_clause).collect();

    let mut seen = HashSet::new();
    let disjoint = lowered
        .iter()
        .flat_map(|doc| doc.keys())
        .all(|key| seen.insert(key.clone()));

    if disjoint {
        Value::Object(lowered.into_iter().flatten().collect())
    } else {
        serde_json::json!({ "$and": lowered })
    }
}

fn lower_clause(clause: &Clause) -> Document {
    let mut doc = Document::new();
    match clause {
        Clause::Exact { field, value } => {
            doc.insert(field.clone(), value.clone());
        }
        Clause::Range { field, min, max } => {
            let mut bounds = Document::new();
            if let Some(min) = min {
                bounds.insert("$gte".to_string(), Value::from(*min));
            }
            if let Some(max) = max {
                bounds.insert("$lte".to_string(), Value::from(*max));
            }
            doc.insert(field.clone(), Value::Object(bounds));
        }
        Clause::MembershipIn { field, value } => {
            doc.insert(field.clone(), serde_json::json!({ "$in": [value] }));
        }
        Clause::Contains { field, needle } => {
            doc.insert(
                field.clone(),
                serde_json::json!({ "$regex": escape_regex(needle), "$options": "i" }),
            );
        }
        Clause::AnyOf { clauses } => {
            let alternatives: Vec<Value> = clauses
                .iter()
                .map(|c| Value::Object(lower_clause(c)))
                .collect();
            doc.insert("$or".to_string(), Value::Array(alternatives));
        }
    }
    doc
}

/// Escapes regex metacharacters so the pattern matches `text` literally.
#[must_use]
pub fn escape_regex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | '#'
                | '&' | '-' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "filter_document_tests.rs"]
mod tests;

//! In-process document store.
//!
//! Keeps collections in insertion order behind a `parking_lot` lock and
//! evaluates [`CompositeQuery`] with [`CompositeQuery::matches`]. Used for
//! local development (`store.backend = "memory"`) and tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{Document, DocumentStore};
use crate::error::Result;
use crate::identifier::ObjectId;
use crate::product::fields;
use crate::query::CompositeQuery;

/// A document store held entirely in memory.
pub struct MemoryStore {
    name: String,
    collections: RwLock<HashMap<String, Vec<(ObjectId, Document)>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Number of documents in a collection.
    #[must_use]
    pub fn count(&self, collection: &str) -> usize {
        self.collections.read().get(collection).map_or(0, Vec::len)
    }

    fn with_native_id(id: &ObjectId, doc: &Document) -> Document {
        let mut out = doc.clone();
        out.insert(fields::ID.to_string(), id.to_extended_json());
        out
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("styleaura")
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn database_name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId> {
        let id = ObjectId::new();
        document.remove(fields::ID);
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push((id, document));
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        query: &CompositeQuery,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, doc)| query.matches(doc))
            .take(limit)
            .map(|(id, doc)| Self::with_native_id(id, doc))
            .collect())
    }

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(doc_id, doc)| Self::with_native_id(doc_id, doc))
        }))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

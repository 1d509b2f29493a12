//! Document store adapters.
//!
//! The catalog treats its backend as an untyped document repository addressed
//! by collection name. [`DocumentStore`] is the only seam: implement it to add
//! a backend. Adapters lower [`CompositeQuery`] to their own query language
//! and return documents with `_id` in the backend's native form; the catalog
//! service normalizes ids afterwards.

pub mod common;
pub mod data_api;
pub mod filter_document;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::{Error, Result};
use crate::identifier::ObjectId;
use crate::query::CompositeQuery;

pub use data_api::{MongoDataApiConfig, MongoDataApiStore};
pub use filter_document::to_filter_document;
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A schemaless document.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Shared handle to a configured store.
pub type StoreHandle = Arc<dyn DocumentStore>;

/// Trait for document store backends.
///
/// Implementations must be safe to share across concurrent requests; they
/// hold no per-request state.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend type name (e.g. "memory", "mongodb", "data_api").
    fn backend(&self) -> &'static str;

    /// Name of the database this store addresses.
    fn database_name(&self) -> &str;

    /// Inserts one document and returns its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the backend rejects or fails the insert.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId>;

    /// Returns at most `limit` documents matching `query`, in backend order.
    ///
    /// No match is an empty vector, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the backend cannot be reached.
    async fn find(
        &self,
        collection: &str,
        query: &CompositeQuery,
        limit: usize,
    ) -> Result<Vec<Document>>;

    /// Fetches one document by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the backend cannot be reached.
    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>>;

    /// Checks that the backend answers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if it does not.
    async fn ping(&self) -> Result<()>;

    /// Lists collection names.
    ///
    /// # Errors
    ///
    /// Backends without a listing facility return [`Error::Unsupported`].
    async fn list_collections(&self) -> Result<Vec<String>> {
        Err(Error::Unsupported(format!(
            "collection listing on '{}' backend",
            self.backend()
        )))
    }
}

/// Creates the store described by `config`.
///
/// Returns `Ok(None)` when no backend is configured; the catalog then runs
/// without a store. The driver backend builds a lazy client, so an
/// unreachable server is reported by the first operation, not here.
///
/// # Errors
///
/// Returns [`Error::Config`] if the backend is selected but incompletely
/// configured or the URL is malformed.
pub async fn connect(config: &StoreConfig) -> Result<Option<StoreHandle>> {
    let backend = config.resolved_backend();
    let store: StoreHandle = match backend {
        StoreBackend::Auto | StoreBackend::None => {
            tracing::warn!("No document store configured; catalog runs without a database");
            return Ok(None);
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new(
            config.database.clone().unwrap_or_else(|| "styleaura".to_string()),
        )),
        StoreBackend::Mongodb => {
            let url = required(config.url.as_deref(), "store.url", backend)?;
            Arc::new(
                MongoStore::connect(
                    url,
                    config.database.as_deref(),
                    Duration::from_secs(config.timeout_secs.max(1)),
                )
                .await?,
            )
        }
        StoreBackend::DataApi => {
            let url = required(config.url.as_deref(), "store.url", backend)?;
            let database = required(config.database.as_deref(), "store.database", backend)?;
            Arc::new(MongoDataApiStore::new(MongoDataApiConfig {
                data_api_url: url.to_string(),
                api_key: config.api_key.clone().unwrap_or_default(),
                database: database.to_string(),
                data_source: config.data_source.clone(),
                timeout_secs: config.timeout_secs,
            })?)
        }
    };

    tracing::info!(
        backend = store.backend(),
        database = store.database_name(),
        "Document store configured"
    );
    Ok(Some(store))
}

fn required<'a>(value: Option<&'a str>, key: &str, backend: StoreBackend) -> Result<&'a str> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::Config(format!(
            "{key} is required for the {} backend",
            backend.as_str()
        ))
    })
}

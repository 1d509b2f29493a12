//! Catalog service: seed, list and lookup over a document store.
//!
//! The service owns an optional store handle. Without one it still answers:
//! listings are empty while seeding and lookups fail with
//! [`Error::StoreUnavailable`].

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::filter::ProductFilter;
use crate::identifier::ObjectId;
use crate::product::ProductRecord;
use crate::query::build;
use crate::store::common::truncate_chars;
use crate::store::StoreHandle;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "clothingproduct";

/// Most collection names a diagnostics report carries.
pub const DIAGNOSTICS_MAX_COLLECTIONS: usize = 10;

/// Longest error text a diagnostics report carries.
pub const DIAGNOSTICS_MAX_ERROR_CHARS: usize = 50;

/// Validated listing size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "usize")]
pub struct PageLimit(usize);

impl PageLimit {
    /// Smallest accepted limit.
    pub const MIN: usize = 1;
    /// Largest accepted limit.
    pub const MAX: usize = 200;
    /// Limit applied when the caller gives none.
    pub const DEFAULT: usize = 50;

    /// Validates `value` against `[MIN, MAX]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] outside the range.
    pub fn new(value: i64) -> Result<Self> {
        Self::within(value, Self::MAX)
    }

    /// Validates `value` against `[MIN, max]`, with `max` capped at
    /// [`Self::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] outside the range.
    pub fn within(value: i64, max: usize) -> Result<Self> {
        let max = max.clamp(Self::MIN, Self::MAX);
        match usize::try_from(value) {
            Ok(v) if (Self::MIN..=max).contains(&v) => Ok(Self(v)),
            _ => Err(Error::InvalidLimit {
                value,
                min: Self::MIN,
                max,
            }),
        }
    }

    /// The limit as a count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for PageLimit {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PageLimit> for usize {
    fn from(limit: PageLimit) -> Self {
        limit.0
    }
}

/// Store health as seen by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Whether a store handle is configured at all.
    pub store_configured: bool,
    /// Whether a store URL (`DATABASE_URL`) was supplied.
    pub database_url_set: bool,
    /// Whether a database name (`DATABASE_NAME`) was supplied.
    pub database_name_set: bool,
    /// Backend name, when configured.
    pub backend: Option<String>,
    /// Database name, when configured.
    pub database_name: Option<String>,
    /// Whether the store answered a ping.
    pub reachable: bool,
    /// Up to ten collection names.
    pub collections: Vec<String>,
    /// First failure, truncated to fifty characters.
    pub error: Option<String>,
}

/// Seed, list and lookup over the product collection.
#[derive(Clone)]
pub struct CatalogService {
    store: Option<StoreHandle>,
    collection: String,
    database_url_set: bool,
    database_name_set: bool,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("backend", &self.store.as_ref().map(|s| s.backend()))
            .field("collection", &self.collection)
            .finish()
    }
}

impl CatalogService {
    /// Creates a service over `store` using the default collection.
    #[must_use]
    pub fn new(store: Option<StoreHandle>) -> Self {
        Self {
            store,
            collection: DEFAULT_COLLECTION.to_string(),
            database_url_set: false,
            database_name_set: false,
        }
    }

    /// Records which store settings were supplied, for diagnostics.
    #[must_use]
    pub fn with_settings(mut self, config: &StoreConfig) -> Self {
        self.database_url_set = config.has_url();
        self.database_name_set = config.has_database();
        self
    }

    /// Uses `collection` instead of the default.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Name of the product collection.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns true when a store is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    fn require_store(&self) -> Result<&StoreHandle> {
        self.store
            .as_ref()
            .ok_or_else(|| Error::StoreUnavailable("no document store configured".to_string()))
    }

    /// Inserts `records` in order and returns their new identifiers.
    ///
    /// Not idempotent: seeding twice stores every record twice. A failure on
    /// record N leaves records before N persisted.
    ///
    /// # Errors
    ///
    /// - [`Error::StoreUnavailable`] before any insert when no store is
    ///   configured.
    /// - [`Error::Write`] when an insert fails.
    pub async fn seed(&self, records: Vec<ProductRecord>) -> Result<Vec<ObjectId>> {
        let store = self.require_store()?;
        let mut inserted = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let document = record.to_document()?;
            match store.insert_one(&self.collection, document).await {
                Ok(id) => inserted.push(id),
                Err(e) => {
                    tracing::warn!(
                        collection = %self.collection,
                        index,
                        inserted = inserted.len(),
                        error = %e,
                        "Seed aborted"
                    );
                    return Err(match e {
                        Error::Write(_) => e,
                        other => Error::Write(other.to_string()),
                    });
                }
            }
        }

        tracing::info!(
            collection = %self.collection,
            count = inserted.len(),
            "Seeded products"
        );
        Ok(inserted)
    }

    /// Lists products matching `filter`, at most `limit` of them.
    ///
    /// Returns an empty list when no store is configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the configured store fails.
    pub async fn list(&self, filter: &ProductFilter, limit: PageLimit) -> Result<Vec<ProductRecord>> {
        let Some(store) = self.store.as_ref() else {
            tracing::debug!("List without a store returns no products");
            return Ok(Vec::new());
        };

        let query = build(filter);
        tracing::debug!(
            collection = %self.collection,
            clauses = query.clauses().len(),
            limit = limit.get(),
            query = ?query,
            "Listing products"
        );

        let documents = store
            .find(&self.collection, &query, limit.get())
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Product listing failed"))?;

        Ok(documents
            .into_iter()
            .map(ProductRecord::from_document)
            .collect())
    }

    /// Fetches one product by its string identifier.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`Error::StoreUnavailable`] when no store is configured or it fails.
    /// - [`Error::InvalidIdentifier`] when `id` is not a well-formed id.
    /// - [`Error::NotFound`] when no product has that id.
    pub async fn get_by_id(&self, id: &str) -> Result<ProductRecord> {
        let store = self.require_store()?;
        let object_id = ObjectId::parse_str(id)?;

        store
            .find_by_id(&self.collection, &object_id)
            .await?
            .map(ProductRecord::from_document)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Checks the store. Never fails; problems are reported in the result.
    pub async fn diagnostics(&self) -> DiagnosticsReport {
        let mut report = DiagnosticsReport {
            database_url_set: self.database_url_set,
            database_name_set: self.database_name_set,
            ..Default::default()
        };
        let Some(store) = self.store.as_ref() else {
            return report;
        };

        report.store_configured = true;
        report.backend = Some(store.backend().to_string());
        report.database_name = Some(store.database_name().to_string());

        if let Err(e) = store.ping().await {
            tracing::warn!(error = %e, "Store ping failed");
            report.error = Some(truncate_chars(&e.to_string(), DIAGNOSTICS_MAX_ERROR_CHARS));
            return report;
        }
        report.reachable = true;

        match store.list_collections().await {
            Ok(mut names) => {
                names.truncate(DIAGNOSTICS_MAX_COLLECTIONS);
                report.collections = names;
            }
            Err(e) => {
                report.error = Some(truncate_chars(&e.to_string(), DIAGNOSTICS_MAX_ERROR_CHARS));
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

//! MongoDB store over the official driver.
//!
//! Selected for `mongodb://` and `mongodb+srv://` store URLs. The client is
//! lazy: building the store does not contact the server, the first operation
//! does. Filters are lowered with [`to_filter_document`] and converted to
//! BSON; documents come back as relaxed extended JSON, so `_id` reads as
//! `{"$oid": "<hex>"}`.

use async_trait::async_trait;
use mongodb::bson::{self, doc, Bson};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use std::time::Duration;

use super::common::redact_url;
use super::filter_document::to_filter_document;
use super::{Document, DocumentStore};
use crate::error::{Error, Result};
use crate::identifier::ObjectId;
use crate::product::fields;
use crate::query::CompositeQuery;

/// Application name reported to the server.
pub const APP_NAME: &str = "styleaura";

/// MongoDB store backed by a driver connection pool.
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parses `url` and builds a client for `database`.
    ///
    /// When `database` is `None` or empty, the database named in the URL path
    /// is used. `mongodb+srv://` URLs are resolved through DNS here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a malformed URL or when no database name
    /// is known, [`Error::StoreUnavailable`] if SRV resolution fails.
    pub async fn connect(url: &str, database: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| connect_failure(url, &e))?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout.min(Duration::from_secs(10)));

        let name = database
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .or_else(|| options.default_database.clone())
            .ok_or_else(|| {
                Error::Config(format!(
                    "No database name for '{}': set store.database or add it to the URL path",
                    redact_url(url)
                ))
            })?;

        let client = Client::with_options(options).map_err(|e| connect_failure(url, &e))?;
        Ok(Self {
            database: client.database(&name),
        })
    }

    fn collection(&self, name: &str) -> Collection<bson::Document> {
        self.database.collection(name)
    }
}

fn connect_failure(url: &str, err: &mongodb::error::Error) -> Error {
    let message = format!("MongoDB connection to '{}' failed: {err}", redact_url(url));
    match *err.kind {
        ErrorKind::InvalidArgument { .. } => Error::Config(message),
        _ => Error::StoreUnavailable(message),
    }
}

fn unavailable(err: &mongodb::error::Error) -> Error {
    Error::StoreUnavailable(format!("MongoDB request failed: {err}"))
}

/// Converts a JSON document to BSON.
pub(crate) fn to_bson_document(document: &Document) -> Result<bson::Document> {
    bson::to_document(document)
        .map_err(|e| Error::Serialization(format!("Failed to convert document to BSON: {e}")))
}

/// Converts a BSON document to relaxed extended JSON.
pub(crate) fn from_bson_document(document: bson::Document) -> Document {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    fn database_name(&self) -> &str {
        self.database.name()
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId> {
        document.remove(fields::ID);
        let document = to_bson_document(&document).map_err(|e| Error::Write(e.to_string()))?;

        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| Error::Write(format!("MongoDB insert failed: {e}")))?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(ObjectId::from_bytes(oid.bytes())),
            other => Err(Error::Write(format!(
                "MongoDB returned an unexpected insertedId: {other}"
            ))),
        }
    }

    async fn find(
        &self,
        collection: &str,
        query: &CompositeQuery,
        limit: usize,
    ) -> Result<Vec<Document>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let filter = match to_filter_document(query) {
            Value::Object(map) => to_bson_document(&map)?,
            _ => bson::Document::new(),
        };

        let mut cursor = self
            .collection(collection)
            .find(filter)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await
            .map_err(|e| unavailable(&e))?;

        let mut documents = Vec::new();
        while cursor.advance().await.map_err(|e| unavailable(&e))? {
            let document = cursor.deserialize_current().map_err(|e| unavailable(&e))?;
            documents.push(from_bson_document(document));
        }
        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>> {
        let oid = bson::oid::ObjectId::from_bytes(id.bytes());
        let document = self
            .collection(collection)
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| unavailable(&e))?;
        Ok(document.map(from_bson_document))
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| unavailable(&e))?;
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        self.database
            .list_collection_names()
            .await
            .map_err(|e| unavailable(&e))
    }
}

#[cfg(test)]
#[path = "mongo_tests.rs"]
mod tests;

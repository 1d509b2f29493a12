//! MongoDB store over the Atlas Data API.
//!
//! Talks to the MongoDB Data API (REST) with `reqwest`; selected for
//! `http(s)://` store URLs. Filters are lowered with
//! [`to_filter_document`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::common::{create_http_client, describe_http_error, validate_url};
use super::filter_document::to_filter_document;
use super::{Document, DocumentStore};
use crate::error::{Error, Result};
use crate::identifier::ObjectId;
use crate::product::fields;
use crate::query::CompositeQuery;

/// Collection read by [`DocumentStore::ping`]. It need not exist.
pub const PING_COLLECTION: &str = "_ping";

const INSERT_ONE: &str = "insertOne";
const FIND: &str = "find";
const FIND_ONE: &str = "findOne";

/// Configuration for the Data API store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoDataApiConfig {
    /// Data API endpoint URL.
    /// Format: https://data.mongodb-api.com/app/<app-id>/endpoint/data/v1
    pub data_api_url: String,
    /// Data API key.
    pub api_key: String,
    /// Database name.
    pub database: String,
    /// Cluster name as known to the Data API.
    #[serde(default = "default_data_source")]
    pub data_source: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_data_source() -> String {
    "mongodb-atlas".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Request body for `insertOne`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertOneRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    document: &'a Document,
}

/// Response from `insertOne`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertOneResponse {
    inserted_id: Value,
}

/// Request body for `find`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    filter: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
}

/// Response from `find`.
#[derive(Debug, Deserialize)]
struct FindResponse {
    documents: Vec<Document>,
}

/// Request body for `findOne`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindOneRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    filter: Value,
}

/// Response from `findOne`.
#[derive(Debug, Deserialize)]
struct FindOneResponse {
    document: Option<Document>,
}

/// MongoDB store backed by the Data API.
pub struct MongoDataApiStore {
    config: MongoDataApiConfig,
    client: Client,
}

impl MongoDataApiStore {
    /// Creates a store with a configured HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid or the client cannot
    /// be built.
    pub fn new(config: MongoDataApiConfig) -> Result<Self> {
        validate_url(&config.data_api_url)?;
        let client = create_http_client(Duration::from_secs(config.timeout_secs.max(1)))?;
        Ok(Self { config, client })
    }

    /// Builds the API URL for a specific action.
    fn build_url(&self, action: &str) -> String {
        format!(
            "{}/action/{}",
            self.config.data_api_url.trim_end_matches('/'),
            action
        )
    }

    /// Makes a POST request to the Data API.
    ///
    /// Failures of `insertOne` map to [`Error::Write`]; everything else maps
    /// to [`Error::StoreUnavailable`].
    async fn api_request<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        body: &T,
    ) -> Result<R> {
        let url = self.build_url(action);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| failure(action, format!("MongoDB API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(action, status = status.as_u16(), "MongoDB Data API call failed");
            return Err(failure(action, describe_http_error(status.as_u16(), &body, "MongoDB")));
        }

        response
            .json()
            .await
            .map_err(|e| failure(action, format!("Failed to parse MongoDB response: {e}")))
    }
}

fn failure(action: &str, message: String) -> Error {
    if action == INSERT_ONE {
        Error::Write(message)
    } else {
        Error::StoreUnavailable(message)
    }
}

#[async_trait]
impl DocumentStore for MongoDataApiStore {
    fn backend(&self) -> &'static str {
        "data_api"
    }

    fn database_name(&self) -> &str {
        &self.config.database
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId> {
        document.remove(fields::ID);
        let request = InsertOneRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection,
            document: &document,
        };

        let response: InsertOneResponse = self.api_request(INSERT_ONE, &request).await?;
        ObjectId::from_json(&response.inserted_id).ok_or_else(|| {
            Error::Write(format!(
                "MongoDB returned an unexpected insertedId: {}",
                response.inserted_id
            ))
        })
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
        let request = FindRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection,
            filter: to_filter_document(query),
            limit: Some(limit as u64),
        };

        let response: FindResponse = self.api_request(FIND, &request).await?;
        Ok(response.documents)
    }

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> Result<Option<Document>> {
        let mut filter = Document::new();
        filter.insert(fields::ID.to_string(), id.to_extended_json());
        let request = FindOneRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection,
            filter: Value::Object(filter),
        };

        let response: FindOneResponse = self.api_request(FIND_ONE, &request).await?;
        Ok(response.document)
    }

    async fn ping(&self) -> Result<()> {
        let request = FindOneRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection: PING_COLLECTION,
            filter: serde_json::json!({}),
        };
        let _: FindOneResponse = self.api_request(FIND_ONE, &request).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "data_api_tests.rs"]
mod tests;

//! # `StyleAura` Core
//!
//! Product catalog query engine for the StyleAura storefront.
//!
//! A caller describes what it wants with a [`ProductFilter`]: optional,
//! independently combinable criteria (category, price range, size, color and
//! free text). [`query::build`] translates the filter into a backend-neutral
//! [`CompositeQuery`], and a [`DocumentStore`] adapter lowers that query to its
//! own query language. [`CatalogService`] ties it together with seed, list
//! and lookup-by-id.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use styleaura_core::{sample_products, CatalogService, MemoryStore, PageLimit, ProductFilter};
//!
//! let catalog = CatalogService::new(Some(Arc::new(MemoryStore::default())));
//! let ids = catalog.seed(sample_products()).await?;
//!
//! let filter = ProductFilter::new().with_category("Men").with_max_price(100.0);
//! let products = catalog.list(&filter, PageLimit::default()).await?;
//!
//! let jacket = catalog.get_by_id(&ids[0].to_hex()).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

pub mod config;
pub mod error;
pub mod filter;
#[cfg(test)]
mod filter_tests;
pub mod identifier;
pub mod product;
pub mod query;
pub mod service;
pub mod store;

pub use config::{
    CatalogConfig, ConfigError, LoggingConfig, ServerConfig, StoreBackend, StoreConfig,
    StyleAuraConfig, DEFAULT_CONFIG_FILE,
};
pub use error::{Error, Result};
pub use filter::ProductFilter;
pub use identifier::ObjectId;
pub use product::{sample_products, ProductRecord};
pub use query::{Clause, CompositeQuery};
pub use service::{CatalogService, DiagnosticsReport, PageLimit};
pub use store::{
    connect, Document, DocumentStore, MemoryStore, MongoDataApiConfig, MongoDataApiStore,
    MongoStore, StoreHandle,
};

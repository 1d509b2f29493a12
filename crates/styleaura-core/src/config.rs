//! `StyleAura` configuration.
//!
//! Provides configuration file support via `styleaura.toml`, environment
//! variables and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Deployment variables `DATABASE_URL`, `DATABASE_NAME`,
//!    `DATABASE_API_KEY`, `PORT`
//! 3. Environment variables (`STYLEAURA_<SECTION>__<KEY>`)
//! 4. Configuration file (`styleaura.toml`)
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "styleaura.toml";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

impl From<ConfigError> for crate::error::Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Which document store backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Chosen from the `store.url` scheme; no store without a URL (default).
    #[default]
    Auto,
    /// Run without a store.
    None,
    /// In-process store; contents are lost on restart.
    Memory,
    /// MongoDB through the driver (`mongodb://`, `mongodb+srv://`).
    Mongodb,
    /// MongoDB Atlas Data API over HTTPS.
    DataApi,
}

impl StoreBackend {
    /// Configuration name of the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
            Self::Memory => "memory",
            Self::Mongodb => "mongodb",
            Self::DataApi => "data_api",
        }
    }
}

/// Document store section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend selection.
    pub backend: StoreBackend,
    /// Connection string or Data API endpoint URL.
    pub url: Option<String>,
    /// Data API key.
    pub api_key: Option<String>,
    /// Database name. The driver backend falls back to the URL path.
    pub database: Option<String>,
    /// Cluster name as known to the Data API.
    pub data_source: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Auto,
            url: None,
            api_key: None,
            database: None,
            data_source: "mongodb-atlas".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    /// Resolves [`StoreBackend::Auto`] against the rest of the section.
    ///
    /// `http(s)://` URLs select the Data API; any other URL goes to the
    /// driver, which rejects schemes it does not know.
    #[must_use]
    pub fn resolved_backend(&self) -> StoreBackend {
        match (self.backend, self.url.as_deref()) {
            (StoreBackend::Auto, Some(url))
                if url.starts_with("http://") || url.starts_with("https://") =>
            {
                StoreBackend::DataApi
            }
            (StoreBackend::Auto, Some(url)) if !url.is_empty() => StoreBackend::Mongodb,
            (StoreBackend::Auto, _) => StoreBackend::None,
            (other, _) => other,
        }
    }

    /// Whether a non-empty `store.url` is set.
    #[must_use]
    pub fn has_url(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Whether a non-empty `store.database` is set.
    #[must_use]
    pub fn has_database(&self) -> bool {
        self.database.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Catalog section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Collection holding product documents.
    pub collection: String,
    /// Listing size when the caller gives no limit.
    pub default_limit: usize,
    /// Largest listing size a caller may ask for.
    pub max_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            collection: "clothingproduct".to_string(),
            default_limit: 50,
            max_limit: 200,
        }
    }
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address.
    pub host: String,
    /// Port number.
    pub port: u16,
    /// Enable permissive CORS.
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_enabled: true,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleAuraConfig {
    /// Document store configuration.
    pub store: StoreConfig,
    /// Catalog configuration.
    pub catalog: CatalogConfig,
    /// Server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl StyleAuraConfig {
    /// Loads configuration from default sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration from a specific file path. A missing file is not
    /// an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::figment(Toml::file(path.as_ref()))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string (no environment).
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn figment(file: figment::providers::Data<Toml>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(file)
            .merge(Env::prefixed("STYLEAURA_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL", "DATABASE_NAME", "DATABASE_API_KEY", "PORT"])
                    .map(|key| match key.as_str() {
                        k if k.eq_ignore_ascii_case("DATABASE_URL") => "store.url".into(),
                        k if k.eq_ignore_ascii_case("DATABASE_NAME") => "store.database".into(),
                        k if k.eq_ignore_ascii_case("DATABASE_API_KEY") => "store.api_key".into(),
                        _ => "server.port".into(),
                    }),
            )
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.collection.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "catalog.collection".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.catalog.max_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "catalog.max_limit".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if !(1..=self.catalog.max_limit).contains(&self.catalog.default_limit) {
            return Err(ConfigError::InvalidValue {
                key: "catalog.default_limit".to_string(),
                message: format!(
                    "value {} is out of range [1, {}]",
                    self.catalog.default_limit, self.catalog.max_limit
                ),
            });
        }

        if self.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "store.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let required = match self.store.backend {
            StoreBackend::Mongodb => vec![("store.url", self.store.has_url())],
            StoreBackend::DataApi => vec![
                ("store.url", self.store.has_url()),
                ("store.database", self.store.has_database()),
            ],
            _ => Vec::new(),
        };
        if let Some((key, _)) = required.into_iter().find(|(_, present)| !present) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("required for the {} backend", self.store.backend.as_str()),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

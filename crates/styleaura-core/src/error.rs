//! Error types for the `StyleAura` catalog.
//!
//! Every failure the catalog surfaces to callers maps to one variant of
//! [`Error`]. Error codes follow the pattern `CATALOG-XXX` so they can be
//! grepped in logs and matched by HTTP clients.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable document store connection (CATALOG-001).
    ///
    /// Raised when the service was started without a store, or when the
    /// store transport failed on a read path.
    #[error("[CATALOG-001] Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store rejected or failed an insert (CATALOG-002).
    #[error("[CATALOG-002] Write error: {0}")]
    Write(String),

    /// Caller-supplied identifier is not well formed (CATALOG-003).
    #[error("[CATALOG-003] Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Well-formed identifier with no matching record (CATALOG-004).
    #[error("[CATALOG-004] Record '{0}' not found")]
    NotFound(String),

    /// Result limit outside the accepted range (CATALOG-005).
    #[error("[CATALOG-005] Invalid limit {value}: expected a value in [{min}, {max}]")]
    InvalidLimit {
        /// Requested limit.
        value: i64,
        /// Smallest accepted limit.
        min: usize,
        /// Largest accepted limit.
        max: usize,
    },

    /// The backing store does not implement this operation (CATALOG-006).
    #[error("[CATALOG-006] Operation not supported by this store: {0}")]
    Unsupported(String),

    /// Configuration error (CATALOG-007).
    #[error("[CATALOG-007] Configuration error: {0}")]
    Config(String),

    /// Serialization error (CATALOG-008).
    #[error("[CATALOG-008] Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns the error code (e.g., "CATALOG-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "CATALOG-001",
            Self::Write(_) => "CATALOG-002",
            Self::InvalidIdentifier(_) => "CATALOG-003",
            Self::NotFound(_) => "CATALOG-004",
            Self::InvalidLimit { .. } => "CATALOG-005",
            Self::Unsupported(_) => "CATALOG-006",
            Self::Config(_) => "CATALOG-007",
            Self::Serialization(_) => "CATALOG-008",
        }
    }

    /// Returns true if the caller may retry the same request unchanged.
    ///
    /// Only write failures qualify: a missing store needs operator action and
    /// every other variant needs different input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

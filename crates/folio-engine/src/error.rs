//! Error types for the transition engine
//!
//! Almost nothing in this crate fails in a user-visible way: a failed fetch,
//! a re-entrant request or missing geometry all degrade to "ignore" or
//! "defer" and are reported through [`crate::engine::Request`] instead.
//! The errors here cover configuration, serialization and the content
//! store boundary.

use crate::content::Slug;

/// Errors that can occur in engine operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The content store failed while resolving a record
    Fetch {
        /// Slug that was being resolved
        slug: Slug,
        /// Store-provided reason
        reason: String,
    },

    /// The content store has no record for the slug
    NotFound(Slug),

    /// DOM measurement is not possible yet (before first paint)
    GeometryUnavailable,

    /// A configuration value is out of range
    InvalidConfig {
        /// Offending field
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// JSON serialization or deserialization failed
    SerializationError(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch { slug, reason } => write!(f, "fetch failed for '{}': {}", slug, reason),
            Self::NotFound(slug) => write!(f, "record not found: {}", slug),
            Self::GeometryUnavailable => write!(f, "grid geometry unavailable"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config '{}': {}", field, reason)
            }
            Self::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by a [`crate::cache::ContentStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend unreachable (network down, CMS outage)
    Unavailable(String),

    /// Backend answered with something that is not a record
    Malformed(String),
}

impl StoreError {
    /// Create an unavailable error with message.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a malformed-response error with message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Attach the slug being resolved, producing an engine error.
    pub fn for_slug(self, slug: &str) -> EngineError {
        let reason = match self {
            StoreError::Unavailable(msg) => format!("store unavailable: {}", msg),
            StoreError::Malformed(msg) => format!("malformed response: {}", msg),
        };
        EngineError::Fetch {
            slug: slug.to_string(),
            reason,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
            Self::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

//! Error types for the record store
//!
//! The in-memory backends never fail on their own; the error channel exists
//! so a fallible backing store can sit behind the same contract.

use std::path::PathBuf;
use std::time::Duration;

/// Errors returned by store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The owning task is gone and no request can be served
    #[error("record store is closed")]
    Closed,

    /// The operation was not admitted before its deadline; nothing was applied
    #[error("operation timed out after {timeout_ms}ms")]
    Timeout {
        /// Deadline that elapsed
        timeout_ms: u64,
    },

    /// Failure reported by a backing store
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create timeout error for a deadline
    #[inline]
    #[must_use]
    pub fn timeout(deadline: Duration) -> Self {
        Self::Timeout {
            timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Check if retrying the same call may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors while loading or validating store configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Well-formed but unusable values
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Backend needs a Tokio runtime and none is running
    #[error("actor backend must be opened inside a tokio runtime")]
    NoRuntime,
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

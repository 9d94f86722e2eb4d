//! Error types for the retrieval module.
//!
//! Three classes of failure surface here: configuration lookups that cannot
//! be satisfied, transport failures while talking to the image service, and
//! filesystem failures while persisting what came back. All of them abort
//! the run; a gap in a retrieved sequence is worse than a stopped run.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while retrieving a collection.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// A configuration lookup failed (unknown format, unknown collection).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Network-level error (DNS resolution, connection refused, TLS errors,
    /// mid-stream disconnects).
    #[error("network error retrieving {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout retrieving {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The image service answered with a non-success status.
    #[error("HTTP {status} retrieving {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// A built resource URL does not parse.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The URL string that failed to parse.
        url: String,
    },

    /// Filesystem error while writing an image or the run log.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl RetrieveError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

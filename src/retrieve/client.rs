//! HTTP client wrapper for fetching image resources.
//!
//! This module provides the `HttpClient` struct which issues GET requests
//! with proper timeout configuration, and a streaming writer that persists a
//! response body to disk without buffering whole master files in memory.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{self, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::RetrieveError;

/// HTTP client for fetching image resources.
///
/// Created once per run and reused for every request, taking advantage of
/// connection pooling against the single image-service host.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for master-format files)
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(constants::user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Sends a GET request for `url` and returns the response with its body
    /// still unread, ready for streaming.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError` if:
    /// - The URL does not parse
    /// - The request fails (network error, timeout)
    /// - The server answers with a non-success status (4xx, 5xx)
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<reqwest::Response, RetrieveError> {
        Url::parse(url).map_err(|_| RetrieveError::invalid_url(url))?;

        debug!("sending request");
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RetrieveError::timeout(url)
            } else {
                RetrieveError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrieveError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }
}

/// Streams a response body into the file at `path`, returning bytes written.
///
/// An existing file at `path` is overwritten. When streaming fails midway the
/// partial file is removed, so a path on disk always holds a complete body.
///
/// # Errors
///
/// Returns `RetrieveError::Io` when the file cannot be created or written,
/// and `RetrieveError::Network` when the body stream breaks.
pub async fn save_response(
    response: reqwest::Response,
    path: &Path,
) -> Result<u64, RetrieveError> {
    let url = response.url().to_string();
    let mut file = File::create(path)
        .await
        .map_err(|e| RetrieveError::io(path, e))?;

    let result = stream_to_file(&mut file, response, &url, path).await;
    if result.is_err() {
        debug!(path = %path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

/// Streams the body to an open file. Extracted so the caller can clean up
/// the partial file on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, RetrieveError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| RetrieveError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| RetrieveError::io(path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| RetrieveError::io(path, e))?;

    Ok(bytes_written)
}

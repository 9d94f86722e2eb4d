//! Constants for the retrieval module (timeouts, client identity).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes; master-format scans run large).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// User-Agent identifying the tool to the image service.
#[must_use]
pub(crate) fn user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("loc-retriever/{version}")
}

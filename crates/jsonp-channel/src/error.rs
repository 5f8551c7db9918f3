//! Error types for JSONP requests

use thiserror::Error;

/// Errors from a one-shot JSONP request.
#[derive(Error, Debug)]
pub enum Error {
    /// Construction-time precondition: the URL must be non-empty.
    #[error("jsonp request requires a non-empty url")]
    EmptyUrl,

    /// No response arrived within the timeout window.
    #[error("timeout jsonp request {callback} after {timeout_ms}ms: {url}")]
    Timeout {
        callback: String,
        url: String,
        timeout_ms: u64,
    },

    /// The transport failed to fetch or parse the response.
    #[error("jsonp transport failed for {callback}: {reason}")]
    Transport { callback: String, reason: String },

    /// The request handle was closed before a terminal event.
    #[error("jsonp request {0} closed before completion")]
    Closed(String),
}

/// Result alias for JSONP operations.
pub type Result<T> = std::result::Result<T, Error>;

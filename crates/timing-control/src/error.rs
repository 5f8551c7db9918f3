//! Error types for the timing wrappers

use thiserror::Error;

/// Errors from memoization.
#[derive(Error, Debug)]
pub enum Error {
    /// The argument tuple could not be serialized into a cache key.
    #[error("memo key serialization failed: {0}")]
    Key(#[from] serde_json::Error),
}

/// Result alias using timing-control Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_error_display_includes_cause() {
        let cause = serde_json::to_value(std::collections::HashMap::from([((1, 2), 3)]))
            .expect_err("non-string map keys cannot serialize");
        let err = Error::Key(cause);
        assert!(
            err.to_string().starts_with("memo key serialization failed:"),
            "got: {err}"
        );
    }
}

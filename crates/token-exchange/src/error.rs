//! Error types for the token-exchange flow

use thiserror::Error;

/// Errors from configuration loading and the exchange flow.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("malformed pony response: {0}")]
    MalformedResponse(String),

    #[error("pony token missing at {0}")]
    MissingToken(String),

    #[error(transparent)]
    Channel(#[from] jsonp_channel::Error),
}

/// Result alias for exchange operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_context() {
        assert_eq!(
            Error::Config("missing field".into()).to_string(),
            "configuration error: missing field"
        );
        assert_eq!(
            Error::MissingToken("data.ponyUrl".into()).to_string(),
            "pony token missing at data.ponyUrl"
        );
    }

    #[test]
    fn channel_errors_pass_through_transparently() {
        let err: Error = jsonp_channel::Error::EmptyUrl.into();
        assert_eq!(err.to_string(), "jsonp request requires a non-empty url");
    }
}

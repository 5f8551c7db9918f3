//! Error types for the leaf utilities

use thiserror::Error;

/// Errors from object operations.
#[derive(Error, Debug)]
pub enum Error {
    /// `extend` requires two JSON objects; anything else fails at call time.
    #[error("cannot merge different types: {0} argument is not an object")]
    NotAnObject(&'static str),
}

/// Result alias using querykit Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_offending_argument() {
        let err = Error::NotAnObject("second");
        assert_eq!(
            err.to_string(),
            "cannot merge different types: second argument is not an object"
        );
    }
}

//! One-shot JSONP-style request channel
//!
//! A JSONP request is a cross-origin GET issued by injecting a script-like
//! resource whose URL carries a generated callback identifier; the loaded
//! resource answers by invoking that callback with a payload. This crate
//! keeps the shape but makes the moving parts explicit and testable:
//!
//! - [`CallbackDirectory`] replaces the browser's global namespace: an
//!   injectable registry of pending callbacks keyed by generated identifier.
//! - [`Transport`] is the script-tag seam: implementations start the fetch
//!   and deliver the payload (or a failure) through the directory.
//!   [`HttpScriptTransport`] does this over HTTP.
//! - [`JsonpRequest`] is the one-shot handle: construction registers the
//!   callback and fires the transport immediately; [`JsonpRequest::result`]
//!   is the single way to await the outcome.
//!
//! Every request reaches exactly one terminal state (resolved, rejected, or
//! timed out) and its directory entry is released exactly once regardless of
//! which; a late response arriving after a timeout is discarded, never
//! double-delivered.

pub mod channel;
pub mod directory;
pub mod error;
pub mod transport;

pub use channel::{DEFAULT_TIMEOUT, JsonpRequest};
pub use directory::CallbackDirectory;
pub use error::{Error, Result};
pub use transport::{HttpScriptTransport, Transport};

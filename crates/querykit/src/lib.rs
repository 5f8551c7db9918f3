//! Leaf utilities shared by the ponykit crates
//!
//! Pure, timing-free helpers: query-string encoding/decoding, JSON object
//! merging, nested-key lookup, cookie-header parsing, and contiguous slice
//! containment. Each function stands alone; the higher-level crates
//! (`jsonp-channel`, `token-exchange`) compose them but nothing here depends
//! on a runtime.

pub mod cookies;
pub mod error;
pub mod object;
pub mod query;
pub mod sequence;

pub use cookies::read_cookies;
pub use error::{Error, Result};
pub use object::{extend, merge, pluck};
pub use query::{dequeryfy, queryfy};
pub use sequence::contains_slice;

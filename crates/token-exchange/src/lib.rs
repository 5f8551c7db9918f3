//! Cross-domain pony/fingerprint token exchange
//!
//! The composite flow built from the leaf crates: generate a "pony" token
//! for the current session, then register it as a fingerprint on the
//! destination domain so the user arrives there already recognized.
//!
//! Two network legs, chained:
//! 1. GET the pony-creation endpoint with the caller's return URL and a
//!    selected subset of its cookies; extract the token from the response.
//! 2. Issue a JSONP request to the fingerprint endpoint embedding the token.
//!
//! There is no retry on either leg; any failure aborts the whole flow and no
//! partial-success state is exposed. Configuration comes from a TOML file in
//! the shape the upstream endpoints dictate (see [`ExchangeConfig`]).

pub mod config;
pub mod error;
pub mod flow;

pub use config::ExchangeConfig;
pub use error::{Error, Result};
pub use flow::{ExchangeOptions, TokenExchange};

//! Query-string composition and decomposition
//!
//! `queryfy` appends or overrides query parameters on a URL, keeping any
//! existing parameters not named in the new set. `dequeryfy` is its inverse
//! for the query portion only; scheme, host and path are passed through
//! untouched by both.
//!
//! A parameter whose value is `Value::Null` serializes as a bare key with no
//! `=`; decoding a bare key yields `Value::Null` back, so the two functions
//! round-trip.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde_json::{Map, Value};

/// Characters escaped the way `encodeURIComponent` escapes them: everything
/// except ASCII alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Compose a URL from a base (which may already carry a query string) and a
/// parameter map. Parameters in `params` win over parameters already present
/// in `url`; a `Null` value keeps the key with no value.
///
/// Non-string scalar values (numbers, booleans) serialize as their JSON text,
/// so `{"a": 2}` becomes `a=2`.
pub fn queryfy(url: &str, params: &Map<String, Value>) -> String {
    let mut merged = dequeryfy(url);
    for (key, value) in params {
        merged.insert(key.clone(), value.clone());
    }

    let base = match url.find('?') {
        Some(index) => &url[..index],
        None => url,
    };

    let mut query = String::new();
    for (key, value) in &merged {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&encode_component(key));
        if let Some(text) = param_text(value) {
            query.push('=');
            query.push_str(&encode_component(&text));
        }
    }

    format!("{base}?{query}")
}

/// Decode the query portion of a URL into a parameter map. Returns an empty
/// map when there is no query string. Keys without `=` map to `Value::Null`;
/// everything else decodes to `Value::String`.
pub fn dequeryfy(url: &str) -> Map<String, Value> {
    let mut params = Map::new();
    let Some((_, query)) = url.split_once('?') else {
        return params;
    };

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((key, value)) => {
                params.insert(decode_component(key), Value::String(decode_component(value)));
            }
            None => {
                params.insert(decode_component(pair), Value::Null);
            }
        }
    }
    params
}

/// Text form of a parameter value, or `None` for the bare-key case.
fn param_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

fn decode_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

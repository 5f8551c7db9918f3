//! Transport seam and the HTTP implementation
//!
//! `Transport` is the script-tag analogue: given the fully composed URL
//! (callback parameter already appended), start the fetch and deliver the
//! outcome through the directory. Keeping it a trait lets tests drive a
//! request without any network and lets the flow crate inject recording
//! doubles.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::directory::CallbackDirectory;

/// Starts the fetch for a JSONP request. Implementations must not block:
/// delivery happens later through [`CallbackDirectory::complete`] or
/// [`CallbackDirectory::fail`], never by return value.
pub trait Transport: Send + Sync {
    fn inject(&self, url: &str, callback: &str, directory: Arc<CallbackDirectory>);
}

/// HTTP-backed transport: GETs the URL, strips the `callback(...)` padding
/// from the body (plain JSON bodies are accepted too), and delivers the
/// payload. Fetch and parse failures are caught locally and delivered as
/// failures — they never surface as an unhandled fault.
#[derive(Default, Clone)]
pub struct HttpScriptTransport {
    client: reqwest::Client,
}

impl HttpScriptTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpScriptTransport {
    fn inject(&self, url: &str, callback: &str, directory: Arc<CallbackDirectory>) {
        let client = self.client.clone();
        let url = url.to_string();
        let callback = callback.to_string();
        tokio::spawn(async move {
            match fetch_body(&client, &url).await {
                Ok(body) => match strip_padding(&callback, &body) {
                    Ok(payload) => {
                        directory.complete(&callback, payload);
                    }
                    Err(reason) => {
                        warn!(callback = %callback, url = %url, reason = %reason, "jsonp payload parse failed");
                        directory.fail(&callback, reason);
                    }
                },
                Err(reason) => {
                    directory.fail(&callback, reason);
                }
            }
        });
    }
}

async fn fetch_body(client: &reqwest::Client, url: &str) -> std::result::Result<String, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("endpoint returned {status}"));
    }

    response
        .text()
        .await
        .map_err(|e| format!("body read failed: {e}"))
}

/// Extract the JSON payload from a `callback(...)` invocation body. A bare
/// JSON body passes through unchanged; anything else is a parse failure.
fn strip_padding(callback: &str, body: &str) -> std::result::Result<Value, String> {
    let trimmed = body.trim().trim_end_matches(';').trim_end();
    let inner = trimmed
        .strip_prefix(callback)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    serde_json::from_str(inner.trim()).map_err(|e| format!("malformed jsonp payload: {e}"))
}

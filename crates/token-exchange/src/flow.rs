//! The two-step pony/fingerprint handshake
//!
//! Step one GETs the pony-creation endpoint with the caller's return URL and
//! the cookies named by `MFP_COOKIE_LIST`, and pulls the token out of the
//! response at `data.ponyUrl`. Step two pushes that token to the fingerprint
//! endpoint over a JSONP request. The original token is returned only once
//! both steps completed; any failure aborts the flow as-is.

use std::sync::Arc;

use jsonp_channel::{CallbackDirectory, DEFAULT_TIMEOUT, HttpScriptTransport, JsonpRequest, Transport};
use querykit::read_cookies;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::config::ExchangeConfig;
use crate::error::{Error, Result};

/// Per-call inputs: where the user should land afterwards, and the raw
/// cookie header to select forwarded cookies from.
#[derive(Debug, Clone, Default)]
pub struct ExchangeOptions {
    pub return_url: String,
    pub cookies: String,
}

/// The composite exchange flow. Holds the HTTP client for the pony leg and
/// the callback directory + transport for the fingerprint leg.
pub struct TokenExchange {
    config: ExchangeConfig,
    client: reqwest::Client,
    directory: Arc<CallbackDirectory>,
    transport: Arc<dyn Transport>,
}

impl TokenExchange {
    pub fn new(
        config: ExchangeConfig,
        client: reqwest::Client,
        directory: Arc<CallbackDirectory>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            client,
            directory,
            transport,
        }
    }

    /// Production wiring: one HTTP client shared by both legs.
    pub fn over_http(config: ExchangeConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            config,
            transport: Arc::new(HttpScriptTransport::new(client.clone())),
            directory: Arc::new(CallbackDirectory::new()),
            client,
        }
    }

    /// Run the full handshake: create a pony token, register it as a
    /// fingerprint, and return the token.
    pub async fn generate_pony(&self, options: &ExchangeOptions) -> Result<String> {
        let body = build_pony_params(&self.config, options);

        let mut params = Map::new();
        params.insert("data".to_string(), Value::String(body.to_string()));
        let url = querykit::queryfy(&self.config.moa_api_createpony, &params);
        debug!(url = %self.config.moa_api_createpony, "requesting pony token");

        let mut request = self.client.get(&url);
        if !options.cookies.is_empty() {
            request = request.header(reqwest::header::COOKIE, &options.cookies);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("pony request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(Error::Http(format!(
                "pony endpoint returned {status}: {body}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(format!("invalid pony response: {e}")))?;

        let pony = querykit::pluck(&payload, "data.ponyUrl")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MissingToken("data.ponyUrl".into()))?
            .replace('&', "");

        info!("pony created");
        self.set_fingerprint(&pony, &options.return_url).await?;
        Ok(pony)
    }

    /// Register the token on the destination domain. Returns the fingerprint
    /// endpoint's payload.
    pub async fn set_fingerprint(&self, pony: &str, return_url: &str) -> Result<Value> {
        let params = build_fingerprint_params(&self.config, pony, return_url);
        let url = querykit::queryfy(&format!("{}put", self.config.mfp_api_url), &params);

        let request = JsonpRequest::open(
            Arc::clone(&self.directory),
            self.transport.as_ref(),
            &url,
            DEFAULT_TIMEOUT,
        )?;
        let response = request.result().await?;

        info!("fingerprint set");
        Ok(response)
    }
}

/// Body of the pony-creation request: the return URL plus the configured
/// subset of the caller's cookies. Cookies named in the list but absent from
/// the header are omitted, not sent as empty.
fn build_pony_params(config: &ExchangeConfig, options: &ExchangeOptions) -> Value {
    let available = read_cookies(&options.cookies);
    let mut cookie = Map::new();
    for name in config.cookie_names() {
        if let Some(value) = available.get(name) {
            cookie.insert(name.to_string(), Value::String(value.clone()));
        }
    }

    json!({
        "data": {
            "return_url": options.return_url,
            "cookieData": { "cookie": cookie },
        }
    })
}

/// Query parameters for the fingerprint endpoint. `contents_inapp` travels
/// as a JSON string, not as nested query parameters — the endpoint parses it
/// on its side.
fn build_fingerprint_params(config: &ExchangeConfig, pony: &str, return_url: &str) -> Map<String, Value> {
    let contents_inapp = json!({
        "api_country": config.content_api_country(),
        "country": config.content_tld(),
        "fpnamespace": config.fingerprint_namespace(),
        "extData": {
            "domain": config.dest_domain,
            "return_url": return_url,
            "ponyUrl": pony,
        },
    });

    let mut params = Map::new();
    params.insert("apikey".to_string(), Value::String(config.api_key().to_string()));
    params.insert(
        "contents_inapp".to_string(),
        Value::String(contents_inapp.to_string()),
    );
    params.insert(
        "country".to_string(),
        Value::String(config.fingerprint_country().to_string()),
    );
    params.insert("expire".to_string(), Value::Number(config.mfp_expire.into()));
    params
}

//! Exchange configuration loading
//!
//! The key names are dictated by the upstream vhost configuration, hence the
//! SCREAMING_SNAKE_CASE in the TOML. Optional keys fall back along a
//! documented precedence chain exposed through accessor methods, so the flow
//! code never reimplements the fallbacks.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Configuration for the pony/fingerprint exchange.
///
/// Required: `MFP_API_URL`, `MOA_API_CREATEPONY`, `MFP_COOKIE_LIST`,
/// `API_COUNTRY`, `TLD`, `SITE_PROFILE`, `DEST_DOMAIN`, and at least one of
/// `MOTIME_API_KEY` / `MOA_API_KEY`. Everything else is an optional override.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ExchangeConfig {
    /// Base URL of the fingerprint API; the flow appends `put`.
    pub mfp_api_url: String,
    /// Pony-creation endpoint.
    pub moa_api_createpony: String,
    /// Comma-separated cookie names forwarded with the pony request.
    pub mfp_cookie_list: String,
    pub motime_api_key: Option<String>,
    pub moa_api_key: Option<String>,
    pub api_country: String,
    pub tld: String,
    pub site_profile: String,
    pub dest_domain: String,
    /// Fingerprint lifetime in seconds.
    #[serde(default = "default_expire")]
    pub mfp_expire: u64,

    // Optional per-field overrides of the defaults above.
    pub mfp_content_inapp_api_country: Option<String>,
    pub mfp_content_inapp_tld: Option<String>,
    pub mfp_namespace: Option<String>,
    pub mfp_tld: Option<String>,
}

fn default_expire() -> u64 {
    300
}

impl ExchangeConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ExchangeConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("MFP_API_URL", &self.mfp_api_url),
            ("MOA_API_CREATEPONY", &self.moa_api_createpony),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::Config(format!(
                    "{name} must start with http:// or https://, got: {url}"
                )));
            }
        }

        if self.motime_api_key.is_none() && self.moa_api_key.is_none() {
            return Err(Error::Config(
                "one of MOTIME_API_KEY or MOA_API_KEY is required".into(),
            ));
        }

        if self.mfp_expire == 0 {
            return Err(Error::Config("MFP_EXPIRE must be greater than 0".into()));
        }

        Ok(())
    }

    /// API key for the fingerprint endpoint: `MOTIME_API_KEY` wins over
    /// `MOA_API_KEY`. Validation guarantees one is present for loaded
    /// configurations.
    pub fn api_key(&self) -> &str {
        self.motime_api_key
            .as_deref()
            .or(self.moa_api_key.as_deref())
            .unwrap_or_default()
    }

    /// `MFP_CONTENT_INAPP_API_COUNTRY` over `API_COUNTRY`.
    pub fn content_api_country(&self) -> &str {
        self.mfp_content_inapp_api_country
            .as_deref()
            .unwrap_or(&self.api_country)
    }

    /// `MFP_CONTENT_INAPP_TLD` over `TLD`.
    pub fn content_tld(&self) -> &str {
        self.mfp_content_inapp_tld.as_deref().unwrap_or(&self.tld)
    }

    /// `MFP_NAMESPACE` over `SITE_PROFILE`.
    pub fn fingerprint_namespace(&self) -> &str {
        self.mfp_namespace.as_deref().unwrap_or(&self.site_profile)
    }

    /// `MFP_TLD` over `TLD`.
    pub fn fingerprint_country(&self) -> &str {
        self.mfp_tld.as_deref().unwrap_or(&self.tld)
    }

    /// Cookie names from `MFP_COOKIE_LIST`, trimmed, empties dropped.
    pub fn cookie_names(&self) -> Vec<&str> {
        self.mfp_cookie_list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

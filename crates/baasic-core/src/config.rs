//! # SDK Configuration
//!
//! [`SdkConfig`] describes where the Baasic API lives and which property names
//! the normalizer uses. It can be built in code, deserialized from JSON, or
//! loaded from environment variables.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `BAASIC_API_ROOT_URL` | `api_root_url` | `api.baasic.com` |
//! | `BAASIC_API_VERSION` | `api_version` | `v1` |
//! | `BAASIC_USE_SSL` | `use_ssl` | `true` |
//! | `BAASIC_APPLICATION_IDENTIFIER` | `application_identifier` | empty |
//!
//! Values that fail to parse fall back to the default.
//!
//! ```rust
//! use baasic_core::SdkConfig;
//!
//! let config = SdkConfig::new("my-app");
//! let url = config.api_url().unwrap();
//! assert_eq!(url.as_str(), "https://api.baasic.com/v1/my-app/");
//! ```

use crate::error::CoreError;
use crate::mapper::{DEFAULT_KEY_PROPERTY, DEFAULT_MODEL_PROPERTY};
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

pub const DEFAULT_API_ROOT_URL: &str = "api.baasic.com";
pub const DEFAULT_API_VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SdkConfig {
    /// Host (and optional port) of the API, without scheme.
    pub api_root_url: String,
    pub api_version: String,
    pub use_ssl: bool,
    pub application_identifier: String,
    /// Identifier field used for keyed lookups.
    pub key_property_name: String,
    /// Envelope field wrapping create/update/remove payloads.
    pub model_property_name: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_root_url: DEFAULT_API_ROOT_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            use_ssl: true,
            application_identifier: String::new(),
            key_property_name: DEFAULT_KEY_PROPERTY.to_owned(),
            model_property_name: DEFAULT_MODEL_PROPERTY.to_owned(),
        }
    }
}

impl SdkConfig {
    pub fn new(application_identifier: impl Into<String>) -> Self {
        Self {
            application_identifier: application_identifier.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads configuration from `BAASIC_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_root_url: env::var("BAASIC_API_ROOT_URL").unwrap_or(defaults.api_root_url),
            api_version: env::var("BAASIC_API_VERSION").unwrap_or(defaults.api_version),
            use_ssl: match env::var("BAASIC_USE_SSL") {
                Ok(val) => val.parse().unwrap_or(defaults.use_ssl),
                Err(_) => defaults.use_ssl,
            },
            application_identifier: env::var("BAASIC_APPLICATION_IDENTIFIER")
                .unwrap_or(defaults.application_identifier),
            ..defaults
        }
    }

    /// Base URL every relative route is resolved against:
    /// `<scheme>://<root>/<version>/<application>/`.
    pub fn api_url(&self) -> Result<Url, CoreError> {
        if self.application_identifier.is_empty() {
            return Err(CoreError::InvalidConfig(
                "application identifier is required".to_owned(),
            ));
        }
        let scheme = if self.use_ssl { "https" } else { "http" };
        let url = Url::parse(&format!(
            "{scheme}://{}/{}/{}/",
            self.api_root_url.trim_matches('/'),
            self.api_version.trim_matches('/'),
            self.application_identifier.trim_matches('/'),
        ))?;
        Ok(url)
    }
}

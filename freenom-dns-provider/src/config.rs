//! Provider configuration
//!
//! Loaded from a JSON document (camelCase keys) or from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{CredentialValidationError, Credentials};

/// Public client-area address.
pub const DEFAULT_BASE_URL: &str = "https://my.freenom.com";
/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the account username.
pub const ENV_USERNAME: &str = "FREENOM_USERNAME";
/// Environment variable holding the account password.
pub const ENV_PASSWORD: &str = "FREENOM_PASSWORD";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const ENV_BASE_URL: &str = "FREENOM_BASE_URL";

/// Everything needed to build a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Client-area origin, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Login credentials.
    pub credentials: Credentials,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ProviderConfig {
    /// Config with default address and timeouts.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: default_base_url(),
            credentials,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Replace the base URL (trailing slashes are dropped).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `FREENOM_USERNAME`, `FREENOM_PASSWORD` and optional `FREENOM_BASE_URL`.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        let map = [ENV_USERNAME, ENV_PASSWORD]
            .into_iter()
            .zip(["username", "password"])
            .filter_map(|(var, key)| std::env::var(var).ok().map(|v| (key.to_string(), v)))
            .collect();
        let credentials = Credentials::from_map(&map)?;

        let mut config = Self::new(credentials);
        if let Ok(base_url) = std::env::var(ENV_BASE_URL)
            && !base_url.trim().is_empty()
        {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Base URL with any trailing slash removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

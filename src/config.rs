//! SDK configuration.
//!
//! [`GatewayConfig`] carries the private key, the gateway endpoint, and the
//! HTTP tuning knobs. It can be built explicitly, from environment
//! variables, or from a TOML file.

use std::{fmt, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    error::{MgwError, Result},
    reliability::RetryPolicy,
    validators,
};

/// Production endpoint of the gateway REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.mgw-gateway.com/v1";

/// Environment variable holding the private key.
pub const ENV_PRIVATE_KEY: &str = "MGW_SDK_PRIVATE_KEY";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "MGW_SDK_BASE_URL";
/// Environment variable setting the forwarded client IP.
pub const ENV_CLIENT_IP: &str = "MGW_SDK_CLIENT_IP";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_pool_max_idle_per_host() -> usize {
    10
}

/// Configuration for a gateway client.
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// Private key authenticating all requests (`s-priv-…` / `p-priv-…`).
    pub private_key: String,

    /// Base URL of the gateway API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum idle pooled connections per host.
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,

    /// End-customer IP forwarded to the gateway in the `CLIENTIP` header.
    #[serde(default)]
    pub client_ip: Option<String>,

    /// Locale sent with every request, e.g. `de-DE`. Controls the language
    /// of customer-facing gateway messages.
    #[serde(default)]
    pub locale: Option<String>,

    /// Retry policy applied to idempotent fetches.
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl GatewayConfig {
    /// Creates a configuration with the given private key and defaults for
    /// everything else.
    #[must_use]
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            client_ip: None,
            locale: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Loads the configuration from environment variables.
    ///
    /// `MGW_SDK_PRIVATE_KEY` is required; `MGW_SDK_BASE_URL` and
    /// `MGW_SDK_CLIENT_IP` are optional overrides.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::Config`] if the private key variable is unset,
    /// or a validation error if the resulting configuration is invalid.
    pub fn from_env() -> Result<Self> {
        let private_key = std::env::var(ENV_PRIVATE_KEY)
            .map_err(|_| MgwError::Config(format!("{ENV_PRIVATE_KEY} is not set")))?;
        let mut config = Self::new(private_key);
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(client_ip) = std::env::var(ENV_CLIENT_IP) {
            config.client_ip = Some(client_ip);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses the configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::Config`] on parse failure, or a validation error
    /// if the parsed configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use mgw_sdk::config::GatewayConfig;
    ///
    /// let config = GatewayConfig::from_toml(
    ///     r#"
    ///     private_key = "s-priv-2a10IfKd7vN9eGh4"
    ///     timeout_secs = 60
    ///     "#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.timeout_secs, 60);
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| MgwError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::Config`] if the file cannot be read, plus any
    /// error [`Self::from_toml`] produces.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MgwError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the private key format and the base URL.
    ///
    /// The base URL must parse, use HTTPS, and not point at a loopback
    /// host.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::InvalidKey`] or [`MgwError::InvalidBaseUrl`].
    pub fn validate(&self) -> Result<()> {
        if !validators::is_valid_private_key(&self.private_key) {
            return Err(MgwError::InvalidKey(
                "private key must match s-priv-… or p-priv-…".to_owned(),
            ));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| MgwError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if url.scheme() != "https" {
            return Err(MgwError::InvalidBaseUrl(format!(
                "base url must use HTTPS, got {}",
                url.scheme()
            )));
        }
        if let Some(host) = url.host_str() {
            let host = host.to_lowercase();
            if host == "localhost" || host.starts_with("127.") || host == "::1" || host == "[::1]" {
                return Err(MgwError::InvalidBaseUrl(format!(
                    "base url must not be loopback: {host}"
                )));
            }
        }

        Ok(())
    }

    /// Total request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// Manual Debug so the private key never leaks into logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("private_key", &mask_key(&self.private_key))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("client_ip", &self.client_ip)
            .field("locale", &self.locale)
            .field("retry", &self.retry)
            .finish()
    }
}

fn mask_key(key: &str) -> String {
    match key.rfind('-') {
        Some(idx) if idx + 1 < key.len() => format!("{}-***", &key[..idx]),
        _ => "***".to_owned(),
    }
}

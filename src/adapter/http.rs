//! Stock HTTP adapter built on reqwest.

use std::{sync::LazyLock, time::Duration};

use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use super::{AdapterResponse, HttpAdapter, HttpMethod};
use crate::{config::GatewayConfig, error::Result};

/// Shared default client so every adapter created with [`ReqwestAdapter::new`]
/// reuses one connection pool.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("default HTTP client must build")
});

/// HTTP adapter using reqwest with connection pooling.
///
/// Every request authenticates with HTTP Basic, private key as username and
/// an empty password, and carries the SDK identification headers the
/// gateway uses for support diagnostics.
#[derive(Debug, Clone)]
pub struct ReqwestAdapter {
    client: Client,
}

impl ReqwestAdapter {
    /// Creates an adapter on the shared default client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }

    /// Creates an adapter with a dedicated client tuned from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MgwError::Http`] if the client cannot be built.
    pub fn with_config(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpAdapter for ReqwestAdapter {
    #[instrument(skip(self, body, config), fields(method = %method, url))]
    async fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
        body: Option<&'a Value>,
        config: &'a GatewayConfig,
    ) -> Result<AdapterResponse> {
        let mut request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        request = request
            .basic_auth(&config.private_key, Some(""))
            .header("Accept", "application/json")
            .header("SDK-TYPE", "mgw-sdk-rust")
            .header("SDK-VERSION", env!("CARGO_PKG_VERSION"));

        if let Some(client_ip) = &config.client_ip {
            request = request.header("CLIENTIP", client_ip);
        }
        if let Some(locale) = &config.locale {
            request = request.header("Accept-Language", locale);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, body_len = body.len(), "gateway responded");

        Ok(AdapterResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_construction() {
        let _ = ReqwestAdapter::new();
        let _ = <ReqwestAdapter as Default>::default();
    }

    #[test]
    fn test_with_config_honors_tuning() {
        let mut config = GatewayConfig::new("s-priv-testkey");
        config.timeout_secs = 5;
        config.pool_max_idle_per_host = 2;
        assert!(ReqwestAdapter::with_config(&config).is_ok());
    }

    #[test]
    fn test_shared_client_is_reused() {
        // Both default adapters clone the same pooled client.
        let _ = &*DEFAULT_HTTP_CLIENT;
        let _a = ReqwestAdapter::new();
        let _b = ReqwestAdapter::new();
    }
}

//! HTTP adapter abstraction.
//!
//! The gateway is plain JSON over HTTPS; everything the SDK needs from the
//! transport is "send this method + path + optional JSON body, give me the
//! raw response back". [`HttpAdapter`] captures exactly that, and
//! [`ReqwestAdapter`] is the stock implementation. Custom adapters (test
//! doubles, instrumented clients) implement the same trait.

use std::{fmt, future::Future};

use serde_json::Value;
use url::Url;

use crate::{
    config::GatewayConfig,
    error::{MgwError, Result},
};

mod http;

pub use http::ReqwestAdapter;

/// HTTP methods used against the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a resource.
    Get,
    /// Create a resource or transaction.
    Post,
    /// Update a resource.
    Put,
    /// Delete a resource.
    Delete,
}

impl HttpMethod {
    /// Method name as it goes on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response handed back by an adapter.
///
/// Adapters do not interpret gateway errors; the resource service decides
/// what a non-2xx status or an `isError` body means.
#[derive(Debug, Clone)]
pub struct AdapterResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl AdapterResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport abstraction over the gateway's REST surface.
pub trait HttpAdapter: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// `url` is the absolute request URL; `body` is serialized as JSON for
    /// POST/PUT and must be `None` for GET/DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::Http`] for transport failures. Gateway-level
    /// rejections are *not* errors at this layer; they come back as a
    /// regular [`AdapterResponse`].
    fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
        body: Option<&'a Value>,
        config: &'a GatewayConfig,
    ) -> impl Future<Output = Result<AdapterResponse>> + Send + 'a;
}

/// Joins the configured base URL and a resource path into a request URL.
///
/// The base URL's trailing slash and the path's leading slash are
/// normalized so the result never contains `//` in the path.
///
/// # Errors
///
/// Returns [`MgwError::InvalidBaseUrl`] if the base URL does not parse.
pub fn build_url(base_url: &str, resource_path: &str) -> Result<String> {
    // Parse once so a malformed base URL fails here, not at the gateway.
    Url::parse(base_url).map_err(|e| MgwError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    Ok(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        resource_path.trim_start_matches('/')
    ))
}

/// Builds a path with URL-encoded query parameters appended.
///
/// # Examples
///
/// ```
/// use mgw_sdk::adapter::build_query_path;
///
/// let path = build_query_path(
///     "types/hire-purchase-direct-debit/plans",
///     &[("amount", "100.0"), ("currency", "EUR")],
/// );
/// assert_eq!(path, "types/hire-purchase-direct-debit/plans?amount=100.0&currency=EUR");
/// ```
#[must_use]
pub fn build_query_path(base_path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base_path.to_owned();
    }
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    format!("{base_path}?{}", serializer.finish())
}

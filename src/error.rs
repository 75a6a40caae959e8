//! Error types for the MGW SDK.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! [`MgwError`] distinguishes gateway-reported failures (with the vendor's
//! error code and both message audiences) from transport, decoding, and
//! configuration failures.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, MgwError>;

/// Well-known gateway response codes.
///
/// The gateway identifies failures by dotted codes such as
/// `API.330.100.007`. The constants here cover the codes integrators
/// commonly branch on; everything else is passed through verbatim in
/// [`MgwError::Api`].
pub mod api_codes {
    /// The requested transaction type is not allowed for the payment type.
    pub const TRANSACTION_AUTHORIZE_NOT_ALLOWED: &str = "API.330.100.007";
    /// The referenced payment could not be found.
    pub const PAYMENT_NOT_FOUND: &str = "API.310.100.003";
    /// The amount exceeds what is left to charge on the authorization.
    pub const CHARGE_AMOUNT_EXCEEDED: &str = "API.330.100.024";
    /// Charged back; no further charges are possible.
    pub const ALREADY_CHARGED_BACK: &str = "API.340.100.024";
}

/// Errors that can occur while talking to the gateway.
///
/// Gateway-side rejections carry the vendor error `code` unchanged along
/// with the two message audiences the gateway distinguishes: the technical
/// `merchant_message` and the end-user-safe `customer_message`.
#[derive(Debug, Error)]
pub enum MgwError {
    /// The gateway rejected the request.
    #[error("gateway error {code}: {merchant_message}")]
    Api {
        /// Vendor error code, e.g. `API.330.100.007`.
        code: String,
        /// Technical message intended for the merchant/integrator.
        merchant_message: String,
        /// Message safe to show to the paying customer.
        customer_message: String,
        /// Gateway-assigned id of the errored entity, if any.
        error_id: Option<String>,
    },

    /// HTTP transport failure (timeout, connect error, TLS, DNS).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request or response body could not be encoded/decoded as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An API key did not match the expected format.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The configured base URL is unusable.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// The operation needs an id the resource does not carry yet.
    #[error("resource is missing its {0} id")]
    MissingResourceId(&'static str),

    /// The gateway returned a body that violates the documented contract.
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),
}

impl MgwError {
    /// Builds an [`MgwError::Api`] from a gateway error body.
    ///
    /// The gateway reports failures as
    /// `{"id": "...", "url": "...", "timestamp": "...", "errors":
    /// [{"code", "merchantMessage", "customerMessage"}]}`. Only the first
    /// entry of `errors` is surfaced; the gateway sends exactly one in
    /// practice.
    ///
    /// Returns `None` when the body carries no `errors` array, so callers
    /// can fall back to [`MgwError::UnexpectedResponse`] for non-conforming
    /// error bodies.
    #[must_use]
    pub fn from_api_body(body: &Value) -> Option<Self> {
        let first = body.get("errors")?.as_array()?.first()?;
        let field = |key: &str| {
            first
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        Some(Self::Api {
            code: field("code"),
            merchant_message: field("merchantMessage"),
            customer_message: field("customerMessage"),
            error_id: body.get("id").and_then(Value::as_str).map(str::to_owned),
        })
    }

    /// Returns the vendor error code if this is a gateway rejection.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

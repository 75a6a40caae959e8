//! Payment types that carry little or no data of their own.

use serde::Serialize;

/// PayPal wallet. The account email is reported back by the gateway after
/// the customer completed the redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paypal {
    /// PayPal account email, response-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// iDEAL bank redirect; the customer's bank is selected via BIC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ideal {
    /// BIC of the customer's bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
}

/// EPS bank redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Eps {
    /// BIC of the customer's bank, optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
}

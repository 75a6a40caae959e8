//! Authorization transaction.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::{Processing, TransactionStatus, status_from_flags};
use crate::{
    adapter::HttpMethod,
    error::Result,
    resources::{Resource, ResourceIds, json},
};

/// Reserves an amount on the payment type for later capture.
///
/// Created under `payments/authorize` for a fresh payment; the gateway
/// assigns the payment and reports its id back in `resources.paymentId`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    #[serde(skip_serializing)]
    id: Option<String>,
    #[serde(skip_serializing)]
    payment_id: Option<String>,

    /// Amount to reserve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// URL the customer returns to after external authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Merchant-side order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Merchant-side invoice id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    /// Reference text shown to the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    /// Overrides the key's 3-D Secure default for this transaction.
    #[serde(rename = "card3ds", skip_serializing_if = "Option::is_none")]
    pub card_3ds: Option<bool>,
    /// Ids of the linked type/customer/basket/metadata.
    #[serde(skip_serializing_if = "ResourceIds::is_empty")]
    pub resources: ResourceIds,
    /// Extra parameters contributed by the payment type.
    #[serde(flatten)]
    pub special_params: serde_json::Map<String, Value>,

    /// Processing data from the gateway.
    #[serde(skip_serializing)]
    pub processing: Processing,
    /// Transaction outcome.
    #[serde(skip_serializing)]
    pub status: Option<TransactionStatus>,
    /// Redirect URL for 3-D Secure or bank redirects.
    #[serde(skip_serializing)]
    pub redirect_url: Option<String>,
}

impl Authorization {
    /// Creates an authorization over `amount` in `currency`.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>, return_url: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            return_url: Some(return_url.into()),
            ..Self::default()
        }
    }

    /// Id of the payment this authorization belongs to.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    /// Pins the authorization to an existing payment.
    pub fn set_payment_id(&mut self, payment_id: impl Into<String>) {
        self.payment_id = Some(payment_id.into());
    }
}

impl Resource for Authorization {
    fn resource_path(&self) -> String {
        match &self.payment_id {
            Some(payment_id) => format!("payments/{payment_id}/authorize"),
            None => "payments/authorize".to_owned(),
        }
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn expose(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn handle_response(&mut self, body: &Value, _method: HttpMethod) {
        json::merge_decimal(&mut self.amount, body, "amount");
        json::merge_str(&mut self.currency, body, "currency");
        json::merge_str(&mut self.return_url, body, "returnUrl");
        json::merge_str(&mut self.order_id, body, "orderId");
        json::merge_str(&mut self.invoice_id, body, "invoiceId");
        json::merge_str(&mut self.payment_reference, body, "paymentReference");
        json::merge_str(&mut self.redirect_url, body, "redirectUrl");
        json::merge_bool(&mut self.card_3ds, body, "card3ds");
        self.resources.merge_from(body);
        self.processing.merge_from(body);
        if let Some(status) = status_from_flags(body) {
            self.status = Some(status);
        }
        if let Some(payment_id) = self.resources.payment_id.clone() {
            self.payment_id = Some(payment_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn authorization() -> Authorization {
        Authorization::new("119.00".parse().unwrap(), "EUR", "https://shop.example/return")
    }

    #[test]
    fn test_path_without_payment() {
        assert_eq!(authorization().resource_path(), "payments/authorize");
    }

    #[test]
    fn test_path_with_payment() {
        let mut auth = authorization();
        auth.set_payment_id("s-pay-254");
        assert_eq!(auth.resource_path(), "payments/s-pay-254/authorize");
    }

    #[test]
    fn test_expose_payload_shape() {
        let mut auth = authorization();
        auth.order_id = Some("o-1701".to_owned());
        auth.card_3ds = Some(true);
        auth.resources.type_id = Some("s-crd-1".to_owned());
        auth.resources.customer_id = Some("s-cst-1".to_owned());
        auth.special_params
            .insert("effectiveInterestRate".to_owned(), json!(4.99));

        let value = auth.expose().unwrap();
        assert_eq!(value["amount"], json!(119.0));
        assert_eq!(value["currency"], "EUR");
        assert_eq!(value["returnUrl"], "https://shop.example/return");
        assert_eq!(value["orderId"], "o-1701");
        assert_eq!(value["card3ds"], true);
        assert_eq!(value["resources"]["typeId"], "s-crd-1");
        assert_eq!(value["effectiveInterestRate"], 4.99);
        assert!(value.get("id").is_none());
        assert!(value.get("processing").is_none());
        assert!(value.get("status").is_none());
    }

    #[test]
    fn test_handle_response_extracts_payment_id() {
        let mut auth = authorization();
        auth.handle_response(
            &json!({
                "id": "s-aut-1",
                "isSuccess": true,
                "redirectUrl": "https://gateway.example/redirect",
                "resources": {"paymentId": "s-pay-254"},
                "processing": {"uniqueId": "u-1", "shortId": "4845.3431.5319"}
            }),
            HttpMethod::Post,
        );

        assert_eq!(auth.payment_id(), Some("s-pay-254"));
        assert_eq!(auth.status, Some(TransactionStatus::Success));
        assert_eq!(auth.redirect_url.as_deref(), Some("https://gateway.example/redirect"));
        assert_eq!(auth.processing.short_id.as_deref(), Some("4845.3431.5319"));
    }

    #[test]
    fn test_handle_response_merges() {
        let mut auth = authorization();
        auth.handle_response(&json!({"isPending": true}), HttpMethod::Post);
        assert_eq!(auth.status, Some(TransactionStatus::Pending));
        assert_eq!(auth.amount, Some("119.00".parse().unwrap()));
        assert_eq!(auth.currency.as_deref(), Some("EUR"));
    }
}

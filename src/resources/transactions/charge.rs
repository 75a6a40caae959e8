//! Charge transaction.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::{Processing, TransactionStatus, status_from_flags};
use crate::{
    adapter::HttpMethod,
    error::Result,
    resources::{Resource, ResourceIds, json},
};

/// Books an amount: either directly on a payment type, or as a capture on
/// an authorized payment.
///
/// A direct charge is created under `payments/charges`; a capture goes
/// under `payments/<payment-id>/charges` and may carry a partial amount.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    #[serde(skip_serializing)]
    id: Option<String>,
    #[serde(skip_serializing)]
    payment_id: Option<String>,

    /// Amount to book. Omitted on captures to book the full remainder.
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
    /// Redirect URL for redirect payment types.
    #[serde(skip_serializing)]
    pub redirect_url: Option<String>,
}

impl Charge {
    /// Creates a direct charge over `amount` in `currency`.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>, return_url: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            return_url: Some(return_url.into()),
            ..Self::default()
        }
    }

    /// Creates a capture on an authorized payment. `amount` of `None`
    /// books the full remaining amount.
    #[must_use]
    pub fn capture(payment_id: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            payment_id: Some(payment_id.into()),
            amount,
            ..Self::default()
        }
    }

    /// Id of the payment this charge belongs to.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    /// Pins the charge to an existing payment.
    pub fn set_payment_id(&mut self, payment_id: impl Into<String>) {
        self.payment_id = Some(payment_id.into());
    }
}

impl Resource for Charge {
    fn resource_path(&self) -> String {
        match &self.payment_id {
            Some(payment_id) => format!("payments/{payment_id}/charges"),
            None => "payments/charges".to_owned(),
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

    #[test]
    fn test_direct_charge_path() {
        let charge = Charge::new("49.99".parse().unwrap(), "EUR", "https://shop.example/return");
        assert_eq!(charge.resource_path(), "payments/charges");
    }

    #[test]
    fn test_capture_path_and_payload() {
        let charge = Charge::capture("s-pay-254", Some("20.00".parse().unwrap()));
        assert_eq!(charge.resource_path(), "payments/s-pay-254/charges");
        assert_eq!(charge.expose().unwrap(), json!({"amount": 20.0}));
    }

    #[test]
    fn test_full_capture_has_empty_payload() {
        let charge = Charge::capture("s-pay-254", None);
        assert_eq!(charge.expose().unwrap(), json!({}));
    }

    #[test]
    fn test_handle_response() {
        let mut charge = Charge::new("49.99".parse().unwrap(), "EUR", "https://r.example");
        charge.handle_response(
            &json!({
                "id": "s-chg-1",
                "isSuccess": true,
                "amount": 49.99,
                "resources": {"paymentId": "s-pay-7"},
                "processing": {"shortId": "4845.3431.5319"}
            }),
            HttpMethod::Post,
        );

        assert_eq!(charge.payment_id(), Some("s-pay-7"));
        assert_eq!(charge.status, Some(TransactionStatus::Success));
        assert_eq!(charge.processing.short_id.as_deref(), Some("4845.3431.5319"));
        assert_eq!(charge.resource_path(), "payments/s-pay-7/charges");
    }
}

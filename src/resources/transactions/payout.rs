//! Payout transaction: credits an amount to the customer.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::{Processing, TransactionStatus, status_from_flags};
use crate::{
    adapter::HttpMethod,
    error::Result,
    resources::{Resource, ResourceIds, json},
};

/// Transfers an amount *to* the customer's payment type, e.g. a credit to
/// their card or bank account.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    #[serde(skip_serializing)]
    id: Option<String>,
    #[serde(skip_serializing)]
    payment_id: Option<String>,

    /// Amount to credit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// URL the customer returns to, where applicable.
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
    /// Ids of the linked type/customer/basket/metadata.
    #[serde(skip_serializing_if = "ResourceIds::is_empty")]
    pub resources: ResourceIds,

    /// Processing data from the gateway.
    #[serde(skip_serializing)]
    pub processing: Processing,
    /// Transaction outcome.
    #[serde(skip_serializing)]
    pub status: Option<TransactionStatus>,
}

impl Payout {
    /// Creates a payout over `amount` in `currency`.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>, return_url: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            return_url: Some(return_url.into()),
            ..Self::default()
        }
    }

    /// Id of the payment this payout belongs to.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }
}

impl Resource for Payout {
    fn resource_path(&self) -> String {
        match &self.payment_id {
            Some(payment_id) => format!("payments/{payment_id}/payouts"),
            None => "payments/payouts".to_owned(),
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
    fn test_payout_path() {
        let payout = Payout::new("50.00".parse().unwrap(), "EUR", "https://shop.example/return");
        assert_eq!(payout.resource_path(), "payments/payouts");
    }

    #[test]
    fn test_handle_response_pins_payment() {
        let mut payout = Payout::new("50.00".parse().unwrap(), "EUR", "https://r.example");
        payout.handle_response(
            &json!({"id": "s-out-1", "isSuccess": true, "resources": {"paymentId": "s-pay-9"}}),
            HttpMethod::Post,
        );
        assert_eq!(payout.payment_id(), Some("s-pay-9"));
        assert_eq!(payout.resource_path(), "payments/s-pay-9/payouts");
        assert_eq!(payout.status, Some(TransactionStatus::Success));
    }

    #[test]
    fn test_expose_shape() {
        let mut payout = Payout::new("50.00".parse().unwrap(), "EUR", "https://r.example");
        payout.resources.type_id = Some("s-sdd-1".to_owned());
        let value = payout.expose().unwrap();
        assert_eq!(value["amount"], json!(50.0));
        assert_eq!(value["resources"]["typeId"], "s-sdd-1");
        assert!(value.get("card3ds").is_none());
    }
}

//! The payment resource: the umbrella entity grouping all transactions of
//! one checkout.

use rust_decimal::Decimal;
use serde_json::Value;

use super::{Resource, ResourceIds, json, transactions::kinds};
use crate::{adapter::HttpMethod, error::Result};

/// Lifecycle state of a payment, as reported by the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentState {
    /// Transactions exist but nothing is finally booked yet.
    #[default]
    Pending,
    /// The full amount was charged.
    Completed,
    /// The payment was canceled before completion.
    Canceled,
    /// Only part of the amount is charged or canceled.
    Partly,
    /// The gateway is reviewing the payment.
    PaymentReview,
    /// A chargeback occurred.
    Chargeback,
}

impl PaymentState {
    /// Maps the gateway's numeric state id.
    #[must_use]
    pub fn from_state_id(id: u64) -> Option<Self> {
        match id {
            0 => Some(Self::Pending),
            1 => Some(Self::Completed),
            2 => Some(Self::Canceled),
            3 => Some(Self::Partly),
            4 => Some(Self::PaymentReview),
            5 => Some(Self::Chargeback),
            _ => None,
        }
    }

    /// Maps the gateway's state name.
    #[must_use]
    pub fn from_state_name(name: &str) -> Option<Self> {
        match name {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            "partly" => Some(Self::Partly),
            "payment review" => Some(Self::PaymentReview),
            "chargeback" => Some(Self::Chargeback),
            _ => None,
        }
    }
}

/// Amount breakdown of a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amount {
    /// Total amount of the payment.
    pub total: Option<Decimal>,
    /// Amount already charged.
    pub charged: Option<Decimal>,
    /// Amount canceled (reversals and refunds).
    pub canceled: Option<Decimal>,
    /// Amount still open for charging.
    pub remaining: Option<Decimal>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
}

impl Amount {
    fn merge_from(&mut self, body: &Value) {
        let Some(amount) = body.get("amount") else {
            return;
        };
        json::merge_decimal(&mut self.total, amount, "total");
        json::merge_decimal(&mut self.charged, amount, "charged");
        json::merge_decimal(&mut self.canceled, amount, "canceled");
        json::merge_decimal(&mut self.remaining, amount, "remaining");
        json::merge_str(&mut self.currency, amount, "currency");
    }
}

/// Reference to a transaction listed on a payment.
///
/// The payment body lists its transactions as `{date, type, status, url,
/// amount}`; the transaction id is the last segment of the url.
#[derive(Debug, Clone, Default)]
pub struct TransactionRef {
    /// Transaction kind, one of the vendor names in
    /// [`kinds`](super::transactions::kinds).
    pub kind: String,
    /// Absolute URL of the transaction resource.
    pub url: Option<String>,
    /// Timestamp as reported by the gateway.
    pub date: Option<String>,
    /// Transaction amount.
    pub amount: Option<Decimal>,
    /// Per-transaction status (`success`, `pending`, `error`).
    pub status: Option<String>,
}

impl TransactionRef {
    /// Transaction id, extracted from the URL's last segment.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        let id = url.trim_end_matches('/').rsplit('/').next()?;
        (!id.is_empty()).then_some(id)
    }

    fn from_value(value: &Value) -> Option<Self> {
        let mut item = Self {
            kind: value.get("type")?.as_str()?.to_owned(),
            ..Self::default()
        };
        json::merge_str(&mut item.url, value, "url");
        json::merge_str(&mut item.date, value, "date");
        json::merge_str(&mut item.status, value, "status");
        json::merge_decimal(&mut item.amount, value, "amount");
        Some(item)
    }
}

/// A payment, grouping authorization, charges, cancellations, shipments and
/// payouts under one id.
#[derive(Debug, Clone, Default)]
pub struct Payment {
    id: Option<String>,
    /// Merchant-side order id.
    pub order_id: Option<String>,
    /// Merchant-side invoice id.
    pub invoice_id: Option<String>,
    /// Lifecycle state.
    pub state: PaymentState,
    /// Amount breakdown.
    pub amount: Amount,
    /// Ids of the linked customer/type/basket/metadata.
    pub resources: ResourceIds,
    /// Redirect URL for payment types that bounce through the gateway.
    pub redirect_url: Option<String>,
    /// Transactions booked on this payment.
    pub transactions: Vec<TransactionRef>,
}

impl Payment {
    /// Creates an empty payment shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shell carrying only an id, ready to be fetched.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }

    /// All transaction refs of the given kind.
    pub fn transactions_of(&self, kind: &str) -> impl Iterator<Item = &TransactionRef> {
        self.transactions.iter().filter(move |t| t.kind == kind)
    }

    /// Ids of the charges booked on this payment.
    #[must_use]
    pub fn charge_ids(&self) -> Vec<&str> {
        self.transactions_of(kinds::CHARGE).filter_map(TransactionRef::id).collect()
    }

    /// Id of the authorization, if one exists.
    #[must_use]
    pub fn authorization_id(&self) -> Option<&str> {
        self.transactions_of(kinds::AUTHORIZE).find_map(TransactionRef::id)
    }
}

impl Resource for Payment {
    fn resource_path(&self) -> String {
        "payments".to_owned()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn expose(&self) -> Result<Value> {
        let mut payload = serde_json::Map::new();
        if let Some(order_id) = &self.order_id {
            payload.insert("orderId".to_owned(), Value::from(order_id.clone()));
        }
        if let Some(invoice_id) = &self.invoice_id {
            payload.insert("invoiceId".to_owned(), Value::from(invoice_id.clone()));
        }
        Ok(Value::Object(payload))
    }

    fn handle_response(&mut self, body: &Value, _method: HttpMethod) {
        json::merge_str(&mut self.order_id, body, "orderId");
        json::merge_str(&mut self.invoice_id, body, "invoiceId");
        json::merge_str(&mut self.redirect_url, body, "redirectUrl");
        self.amount.merge_from(body);
        self.resources.merge_from(body);

        if let Some(state) = body.get("state") {
            let mapped = state
                .get("id")
                .and_then(Value::as_u64)
                .and_then(PaymentState::from_state_id)
                .or_else(|| {
                    state
                        .get("name")
                        .and_then(Value::as_str)
                        .and_then(PaymentState::from_state_name)
                });
            if let Some(mapped) = mapped {
                self.state = mapped;
            }
        }

        if let Some(transactions) = body.get("transactions").and_then(Value::as_array) {
            self.transactions =
                transactions.iter().filter_map(TransactionRef::from_value).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payment_body() -> Value {
        json!({
            "id": "s-pay-254",
            "state": {"id": 3, "name": "partly"},
            "amount": {
                "total": 119.0,
                "charged": 33.0,
                "canceled": 0.0,
                "remaining": 86.0,
                "currency": "EUR"
            },
            "orderId": "o-1701",
            "resources": {
                "customerId": "s-cst-50",
                "typeId": "s-crd-9wmri5mdlqps",
                "basketId": "s-bsk-1",
                "metadataId": "s-mtd-1"
            },
            "transactions": [
                {
                    "date": "2026-02-11 13:40:01",
                    "type": "authorize",
                    "status": "success",
                    "url": "https://api.mgw-gateway.com/v1/payments/s-pay-254/authorize/s-aut-1",
                    "amount": 119.0
                },
                {
                    "date": "2026-02-11 13:41:25",
                    "type": "charge",
                    "status": "success",
                    "url": "https://api.mgw-gateway.com/v1/payments/s-pay-254/charges/s-chg-1",
                    "amount": 33.0
                }
            ]
        })
    }

    #[test]
    fn test_handle_response_maps_nested_body() {
        let mut payment = Payment::new();
        payment.handle_response(&payment_body(), HttpMethod::Get);

        assert_eq!(payment.state, PaymentState::Partly);
        assert_eq!(payment.order_id.as_deref(), Some("o-1701"));
        assert_eq!(payment.amount.total, Some("119".parse().unwrap()));
        assert_eq!(payment.amount.remaining, Some("86".parse().unwrap()));
        assert_eq!(payment.amount.currency.as_deref(), Some("EUR"));
        assert_eq!(payment.resources.type_id.as_deref(), Some("s-crd-9wmri5mdlqps"));
        assert_eq!(payment.transactions.len(), 2);
        assert_eq!(payment.authorization_id(), Some("s-aut-1"));
        assert_eq!(payment.charge_ids(), vec!["s-chg-1"]);
    }

    #[test]
    fn test_handle_response_merges() {
        let mut payment = Payment::new();
        payment.order_id = Some("kept-order".to_owned());
        payment.handle_response(&json!({"state": {"id": 1}}), HttpMethod::Get);

        assert_eq!(payment.state, PaymentState::Completed);
        assert_eq!(payment.order_id.as_deref(), Some("kept-order"));
        assert!(payment.transactions.is_empty());
    }

    #[test]
    fn test_state_mapping_falls_back_to_name() {
        let mut payment = Payment::new();
        payment.handle_response(&json!({"state": {"name": "chargeback"}}), HttpMethod::Get);
        assert_eq!(payment.state, PaymentState::Chargeback);

        payment.handle_response(&json!({"state": {"id": 99, "name": "weird"}}), HttpMethod::Get);
        assert_eq!(payment.state, PaymentState::Chargeback, "unknown state leaves value alone");
    }

    #[test]
    fn test_transaction_ref_id_extraction() {
        let transaction = TransactionRef {
            kind: "charge".to_owned(),
            url: Some("https://api.example.com/v1/payments/s-pay-1/charges/s-chg-7/".to_owned()),
            ..TransactionRef::default()
        };
        assert_eq!(transaction.id(), Some("s-chg-7"));

        let no_url = TransactionRef { kind: "charge".to_owned(), ..TransactionRef::default() };
        assert_eq!(no_url.id(), None);
    }

    #[test]
    fn test_expose_contains_only_set_fields() {
        let mut payment = Payment::new();
        assert_eq!(payment.expose().unwrap(), json!({}));

        payment.order_id = Some("o-9".to_owned());
        assert_eq!(payment.expose().unwrap(), json!({"orderId": "o-9"}));
    }

    #[test]
    fn test_with_id() {
        let payment = Payment::with_id("s-pay-1");
        assert_eq!(payment.id(), Some("s-pay-1"));
        assert_eq!(payment.resource_path(), "payments");
    }
}

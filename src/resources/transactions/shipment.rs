//! Shipment transaction.

use serde::Serialize;
use serde_json::Value;

use super::{Processing, TransactionStatus, status_from_flags};
use crate::{
    adapter::HttpMethod,
    error::Result,
    resources::{Resource, json},
};

/// Reports the goods of an insured invoice payment as shipped, which
/// starts the due-date clock on the gateway side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(skip_serializing)]
    id: Option<String>,
    #[serde(skip_serializing)]
    payment_id: Option<String>,

    /// Merchant-side invoice id the shipment belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    /// Merchant-side order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Processing data from the gateway.
    #[serde(skip_serializing)]
    pub processing: Processing,
    /// Transaction outcome.
    #[serde(skip_serializing)]
    pub status: Option<TransactionStatus>,
}

impl Shipment {
    /// Creates a shipment for the given payment.
    #[must_use]
    pub fn new(payment_id: impl Into<String>) -> Self {
        Self { payment_id: Some(payment_id.into()), ..Self::default() }
    }

    /// Id of the payment this shipment belongs to.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }
}

impl Resource for Shipment {
    fn resource_path(&self) -> String {
        match &self.payment_id {
            Some(payment_id) => format!("payments/{payment_id}/shipments"),
            None => "payments/shipments".to_owned(),
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
        json::merge_str(&mut self.invoice_id, body, "invoiceId");
        json::merge_str(&mut self.order_id, body, "orderId");
        self.processing.merge_from(body);
        if let Some(status) = status_from_flags(body) {
            self.status = Some(status);
        }
    }
}

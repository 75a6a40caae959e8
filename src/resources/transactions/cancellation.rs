//! Cancellation transaction: reversal of an authorization or refund of a
//! charge.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::{Processing, TransactionStatus, kinds, status_from_flags};
use crate::{
    adapter::HttpMethod,
    error::Result,
    resources::{Resource, json},
};

/// What a cancellation is aimed at. The vendor distinguishes the two by
/// transaction type: `cancel-authorize` (reversal) vs `cancel-charge`
/// (refund).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellationTarget {
    /// Cancel the (not yet captured) authorization.
    Authorization,
    /// Refund a booked charge.
    Charge {
        /// Id of the charge to refund.
        charge_id: String,
    },
}

/// Cancels an authorization or refunds a charge, fully or partially.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    #[serde(skip_serializing)]
    id: Option<String>,
    #[serde(skip_serializing)]
    payment_id: String,
    #[serde(skip_serializing)]
    target: CancellationTarget,

    /// Amount to cancel. Omitted to cancel the full amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Reference text shown to the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,

    /// Processing data from the gateway.
    #[serde(skip_serializing)]
    pub processing: Processing,
    /// Transaction outcome.
    #[serde(skip_serializing)]
    pub status: Option<TransactionStatus>,
}

impl Cancellation {
    /// A reversal of the payment's authorization.
    #[must_use]
    pub fn reversal(payment_id: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            id: None,
            payment_id: payment_id.into(),
            target: CancellationTarget::Authorization,
            amount,
            payment_reference: None,
            processing: Processing::default(),
            status: None,
        }
    }

    /// A refund of the given charge.
    #[must_use]
    pub fn refund(
        payment_id: impl Into<String>,
        charge_id: impl Into<String>,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            id: None,
            payment_id: payment_id.into(),
            target: CancellationTarget::Charge { charge_id: charge_id.into() },
            amount,
            payment_reference: None,
            processing: Processing::default(),
            status: None,
        }
    }

    /// Id of the payment this cancellation belongs to.
    #[must_use]
    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    /// What this cancellation targets.
    #[must_use]
    pub fn target(&self) -> &CancellationTarget {
        &self.target
    }

    /// The vendor transaction type this cancellation books as.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.target {
            CancellationTarget::Authorization => kinds::REVERSAL,
            CancellationTarget::Charge { .. } => kinds::REFUND,
        }
    }
}

impl Resource for Cancellation {
    fn resource_path(&self) -> String {
        match &self.target {
            CancellationTarget::Authorization => {
                format!("payments/{}/authorize/cancels", self.payment_id)
            }
            CancellationTarget::Charge { charge_id } => {
                format!("payments/{}/charges/{charge_id}/cancels", self.payment_id)
            }
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
        json::merge_str(&mut self.payment_reference, body, "paymentReference");
        self.processing.merge_from(body);
        if let Some(status) = status_from_flags(body) {
            self.status = Some(status);
        }
    }
}

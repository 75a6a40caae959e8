//! Transaction resources: the operations booked on a payment.

use serde_json::Value;

use super::json;

mod authorization;
mod cancellation;
mod charge;
mod payout;
mod shipment;

pub use authorization::Authorization;
pub use cancellation::{Cancellation, CancellationTarget};
pub use charge::Charge;
pub use payout::Payout;
pub use shipment::Shipment;

/// The vendor's transaction type names, exactly as they appear on the
/// wire and in payment transaction lists.
pub mod kinds {
    /// Reserve an amount for later capture.
    pub const AUTHORIZE: &str = "authorize";
    /// Book an amount.
    pub const CHARGE: &str = "charge";
    /// Cancel an authorization before capture.
    pub const REVERSAL: &str = "cancel-authorize";
    /// Cancel a booked charge.
    pub const REFUND: &str = "cancel-charge";
    /// Report goods as shipped for insured invoice types.
    pub const SHIPMENT: &str = "shipment";
    /// Credit an amount to the customer.
    pub const PAYOUT: &str = "payout";
    /// Customer-initiated reversal of a charge.
    pub const CHARGEBACK: &str = "chargeback";
}

/// Outcome of a transaction, derived from the gateway's
/// `isSuccess`/`isPending`/`isError` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// The transaction is booked.
    Success,
    /// The transaction waits on an external step (redirect, review).
    Pending,
    /// The transaction failed.
    Error,
}

pub(crate) fn status_from_flags(body: &Value) -> Option<TransactionStatus> {
    if json::bool_flag(body, "isSuccess") {
        Some(TransactionStatus::Success)
    } else if json::bool_flag(body, "isPending") {
        Some(TransactionStatus::Pending)
    } else if json::bool_flag(body, "isError") {
        Some(TransactionStatus::Error)
    } else {
        None
    }
}

/// Gateway processing data attached to every transaction response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Processing {
    /// Unique id of the processing run.
    pub unique_id: Option<String>,
    /// Short id shown on customer statements.
    pub short_id: Option<String>,
    /// Trace id for gateway support.
    pub trace_id: Option<String>,
}

impl Processing {
    pub(crate) fn merge_from(&mut self, body: &Value) {
        let Some(processing) = body.get("processing") else {
            return;
        };
        json::merge_str(&mut self.unique_id, processing, "uniqueId");
        json::merge_str(&mut self.short_id, processing, "shortId");
        json::merge_str(&mut self.trace_id, processing, "traceId");
    }
}

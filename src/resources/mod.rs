//! Typed resources mirroring the gateway's remote entities.
//!
//! Every remote entity (payments, customers, baskets, payment types,
//! transactions, the hosted payment page) is modeled as a plain data struct
//! implementing [`Resource`]: it knows its path under the API root, exposes
//! a JSON payload for transmission, and merge-maps gateway responses back
//! onto its fields.

use serde::Serialize;
use serde_json::Value;

use crate::{adapter::HttpMethod, error::Result};

pub mod basket;
pub mod customer;
pub mod instalment_plans;
pub mod keypair;
pub mod metadata;
pub mod payment;
pub mod payment_types;
pub mod paypage;
pub mod transactions;

pub(crate) mod json;

pub use basket::{Basket, BasketItem};
pub use customer::{Address, Customer, Salutation};
pub use instalment_plans::{InstalmentPlan, InstalmentPlans};
pub use keypair::Keypair;
pub use metadata::Metadata;
pub use payment::{Amount, Payment, PaymentState, TransactionRef};
pub use payment_types::PaymentType;
pub use paypage::{Paypage, PaypageAction};
pub use transactions::{
    Authorization, Cancellation, Charge, Payout, Processing, Shipment, TransactionStatus,
};

/// A remote entity mirrored to and from gateway JSON.
///
/// Response handling is a *merge*: fields absent from a response never
/// clear state already present on the resource.
pub trait Resource {
    /// Path of this resource relative to the API root, without the id
    /// segment (e.g. `payments`, `types/sepa-direct-debit`).
    fn resource_path(&self) -> String;

    /// Gateway-assigned id, once known.
    fn id(&self) -> Option<&str>;

    /// Stores the gateway-assigned id.
    fn set_id(&mut self, id: String);

    /// JSON payload transmitted on create/update. Unset optional fields
    /// are omitted entirely.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MgwError::Json`] if serialization fails.
    fn expose(&self) -> Result<Value>;

    /// Merge-maps a gateway response body onto this resource's fields.
    ///
    /// `method` is the request method the response belongs to; a few
    /// resources behave differently for reads than for writes.
    fn handle_response(&mut self, body: &Value, method: HttpMethod);

    /// Id of a linked payment that must be re-fetched after this response
    /// was handled, or `None`.
    ///
    /// The resource service honors this after [`Self::handle_response`];
    /// the hosted payment page uses it to refresh its payment on every
    /// non-GET response.
    fn payment_to_refresh(&self, _method: HttpMethod) -> Option<String> {
        None
    }

    /// Receives the freshly fetched payment requested via
    /// [`Self::payment_to_refresh`].
    fn attach_refreshed_payment(&mut self, _payment: Payment) {}
}

/// Ids of resources linked to a transaction or paypage, transmitted and
/// received as the nested `resources` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIds {
    /// Id of the payment the transaction belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Id of the linked customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Id of the payment type used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    /// Id of the linked basket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basket_id: Option<String>,
    /// Id of the linked metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_id: Option<String>,
}

impl ResourceIds {
    /// True when no id is set; such a block is omitted from payloads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payment_id.is_none()
            && self.customer_id.is_none()
            && self.type_id.is_none()
            && self.basket_id.is_none()
            && self.metadata_id.is_none()
    }

    /// Merges the `resources` object of a response body, if present.
    pub(crate) fn merge_from(&mut self, body: &Value) {
        let Some(resources) = body.get("resources") else {
            return;
        };
        json::merge_str(&mut self.payment_id, resources, "paymentId");
        json::merge_str(&mut self.customer_id, resources, "customerId");
        json::merge_str(&mut self.type_id, resources, "typeId");
        json::merge_str(&mut self.basket_id, resources, "basketId");
        json::merge_str(&mut self.metadata_id, resources, "metadataId");
    }
}

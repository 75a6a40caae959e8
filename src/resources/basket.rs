//! Basket resource: the shopping cart transmitted alongside transactions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Resource, json};
use crate::{adapter::HttpMethod, error::Result};

/// A single line item of a basket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    /// Merchant-side reference of the line item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basket_item_reference_id: Option<String>,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Unit of measurement, e.g. `pc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Quantity ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Gross price per unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_per_unit: Option<Decimal>,
    /// Net amount of the whole line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_net: Option<Decimal>,
    /// Gross amount of the whole line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_gross: Option<Decimal>,
    /// VAT amount of the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_vat: Option<Decimal>,
    /// Discount applied to the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_discount: Option<Decimal>,
    /// VAT percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,
}

/// A basket referenced by transactions for risk checks and invoice-style
/// payment types.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    #[serde(skip_serializing)]
    id: Option<String>,

    /// Gross total over all items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_total_gross: Option<Decimal>,
    /// Total discount over all items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_total_discount: Option<Decimal>,
    /// Total VAT over all items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_total_vat: Option<Decimal>,
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Merchant-side order id the basket belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Free-text note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Line items.
    #[serde(rename = "basketItems", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<BasketItem>,
}

impl Basket {
    /// Creates a basket with totals and order reference.
    #[must_use]
    pub fn new(
        amount_total_gross: Decimal,
        currency_code: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            amount_total_gross: Some(amount_total_gross),
            currency_code: Some(currency_code.into()),
            order_id: Some(order_id.into()),
            ..Self::default()
        }
    }
}

impl Resource for Basket {
    fn resource_path(&self) -> String {
        "baskets".to_owned()
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
        json::merge_decimal(&mut self.amount_total_gross, body, "amountTotalGross");
        json::merge_decimal(&mut self.amount_total_discount, body, "amountTotalDiscount");
        json::merge_decimal(&mut self.amount_total_vat, body, "amountTotalVat");
        json::merge_str(&mut self.currency_code, body, "currencyCode");
        json::merge_str(&mut self.order_id, body, "orderId");
        json::merge_str(&mut self.note, body, "note");

        if let Some(items) = body.get("basketItems") {
            if let Ok(parsed) = serde_json::from_value(items.clone()) {
                self.items = parsed;
            }
        }
    }
}

//! Card payment type.

use serde::Serialize;
use serde_json::Value;

use crate::resources::json;

/// Credit or debit card data.
///
/// Responses echo the number masked (`471110******0000`); the SDK stores
/// whatever the gateway sent back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// PAN, or its masked form when read back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Card verification code. Never echoed by the gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<String>,
    /// Expiry in `MM/YYYY` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Cardholder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    /// Whether 3-D Secure is enforced for this card.
    #[serde(rename = "3ds", skip_serializing_if = "Option::is_none")]
    pub secured: Option<bool>,
    /// Card brand, reported by the gateway (`VISA`, `MASTER`, …).
    #[serde(skip_serializing)]
    pub brand: Option<String>,
}

impl Card {
    /// Creates card data from number, cvc and expiry.
    #[must_use]
    pub fn new(
        number: impl Into<String>,
        cvc: impl Into<String>,
        expiry_date: impl Into<String>,
    ) -> Self {
        Self {
            number: Some(number.into()),
            cvc: Some(cvc.into()),
            expiry_date: Some(expiry_date.into()),
            ..Self::default()
        }
    }

    pub(crate) fn merge_from(&mut self, body: &Value) {
        json::merge_str(&mut self.number, body, "number");
        json::merge_str(&mut self.expiry_date, body, "expiryDate");
        json::merge_str(&mut self.holder, body, "holder");
        json::merge_str(&mut self.brand, body, "brand");
        json::merge_bool(&mut self.secured, body, "3ds");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_uses_wire_names() {
        let mut card = Card::new("4711100000000000", "123", "12/2030");
        card.secured = Some(true);
        card.brand = Some("VISA".to_owned());

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            json!({
                "number": "4711100000000000",
                "cvc": "123",
                "expiryDate": "12/2030",
                "3ds": true
            })
        );
    }

    #[test]
    fn test_merge_keeps_cvc() {
        let mut card = Card::new("4711100000000000", "123", "12/2030");
        card.merge_from(&json!({
            "number": "471110******0000",
            "brand": "VISA"
        }));

        assert_eq!(card.number.as_deref(), Some("471110******0000"));
        assert_eq!(card.brand.as_deref(), Some("VISA"));
        assert_eq!(card.cvc.as_deref(), Some("123"), "cvc is never echoed, keep local value");
        assert_eq!(card.expiry_date.as_deref(), Some("12/2030"));
    }
}

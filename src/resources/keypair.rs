//! Keypair resource: read-only information about the authenticated key.

use serde_json::Value;

use super::{Resource, json};
use crate::{adapter::HttpMethod, error::Result};

/// Information the gateway reports about the key pair in use: the public
/// key belonging to the configured private key and the payment types the
/// pair is enabled for.
#[derive(Debug, Clone, Default)]
pub struct Keypair {
    /// Public key of the pair.
    pub public_key: Option<String>,
    /// Payment type names available to this key pair.
    pub available_payment_types: Vec<String>,
    /// Security level of the key, e.g. `SAQ-A`.
    pub secure_level: Option<String>,
}

impl Keypair {
    /// Creates an empty keypair shell ready to be fetched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Resource for Keypair {
    fn resource_path(&self) -> String {
        "keypair".to_owned()
    }

    // The keypair is a singleton under the authenticated key; it has no id.
    fn id(&self) -> Option<&str> {
        None
    }

    fn set_id(&mut self, _id: String) {}

    fn expose(&self) -> Result<Value> {
        Ok(Value::Object(serde_json::Map::new()))
    }

    fn handle_response(&mut self, body: &Value, _method: HttpMethod) {
        json::merge_str(&mut self.public_key, body, "publicKey");
        json::merge_str(&mut self.secure_level, body, "secureLevel");

        if let Some(types) = body.get("availablePaymentTypes").and_then(Value::as_array) {
            self.available_payment_types =
                types.iter().filter_map(Value::as_str).map(str::to_owned).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_handle_response() {
        let mut keypair = Keypair::new();
        keypair.handle_response(
            &json!({
                "publicKey": "s-pub-2a10IfKd7vN9eGh4",
                "secureLevel": "SAQ-A",
                "availablePaymentTypes": ["card", "sepa-direct-debit", "paypal"]
            }),
            HttpMethod::Get,
        );

        assert_eq!(keypair.public_key.as_deref(), Some("s-pub-2a10IfKd7vN9eGh4"));
        assert_eq!(keypair.secure_level.as_deref(), Some("SAQ-A"));
        assert_eq!(keypair.available_payment_types.len(), 3);
        assert!(keypair.available_payment_types.contains(&"paypal".to_owned()));
    }

    #[test]
    fn test_keypair_has_no_id() {
        let mut keypair = Keypair::new();
        keypair.set_id("ignored".to_owned());
        assert_eq!(keypair.id(), None);
        assert_eq!(keypair.resource_path(), "keypair");
    }
}

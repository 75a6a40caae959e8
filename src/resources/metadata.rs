//! Metadata resource: free-form key/value data attached to payments.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{Resource, json};
use crate::{adapter::HttpMethod, error::Result};

const SHOP_TYPE: &str = "shopType";
const SHOP_VERSION: &str = "shopVersion";
const SDK_TYPE: &str = "sdkType";
const SDK_VERSION: &str = "sdkVersion";

/// Free key/value metadata.
///
/// The shop and SDK identification fields serialize at the top level next
/// to the custom entries; their keys are reserved and cannot be used as
/// custom keys.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    id: Option<String>,
    /// Shop system identifier, e.g. `shopware`.
    pub shop_type: Option<String>,
    /// Shop system version.
    pub shop_version: Option<String>,
    custom: BTreeMap<String, String>,
}

impl Metadata {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom entry. Reserved keys (`shopType`, `shopVersion`,
    /// `sdkType`, `sdkVersion`) are ignored; use the dedicated fields.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        if !matches!(key.as_str(), SHOP_TYPE | SHOP_VERSION | SDK_TYPE | SDK_VERSION) {
            self.custom.insert(key, value.into());
        }
        self
    }

    /// Reads a custom entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.custom.get(key).map(String::as_str)
    }

    /// Custom entries in key order.
    #[must_use]
    pub fn custom_entries(&self) -> &BTreeMap<String, String> {
        &self.custom
    }
}

impl Resource for Metadata {
    fn resource_path(&self) -> String {
        "metadata".to_owned()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn expose(&self) -> Result<Value> {
        let mut payload = serde_json::Map::new();
        payload.insert(SDK_TYPE.to_owned(), Value::from("mgw-sdk-rust"));
        payload.insert(SDK_VERSION.to_owned(), Value::from(env!("CARGO_PKG_VERSION")));
        if let Some(shop_type) = &self.shop_type {
            payload.insert(SHOP_TYPE.to_owned(), Value::from(shop_type.clone()));
        }
        if let Some(shop_version) = &self.shop_version {
            payload.insert(SHOP_VERSION.to_owned(), Value::from(shop_version.clone()));
        }
        for (key, value) in &self.custom {
            payload.insert(key.clone(), Value::from(value.clone()));
        }
        Ok(Value::Object(payload))
    }

    fn handle_response(&mut self, body: &Value, _method: HttpMethod) {
        json::merge_str(&mut self.shop_type, body, SHOP_TYPE);
        json::merge_str(&mut self.shop_version, body, SHOP_VERSION);

        let Some(object) = body.as_object() else {
            return;
        };
        for (key, value) in object {
            if matches!(key.as_str(), SHOP_TYPE | SHOP_VERSION | SDK_TYPE | SDK_VERSION | "id") {
                continue;
            }
            if let Some(value) = value.as_str() {
                self.custom.insert(key.clone(), value.to_owned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_expose_mixes_fixed_and_custom_fields() {
        let mut metadata = Metadata::new();
        metadata.shop_type = Some("shopware".to_owned());
        metadata.shop_version = Some("6.5.1".to_owned());
        metadata.insert("invoice-nr", "i-4711").insert("delivery-date", "2026-08-21");

        let value = metadata.expose().unwrap();
        assert_eq!(value["shopType"], "shopware");
        assert_eq!(value["shopVersion"], "6.5.1");
        assert_eq!(value["invoice-nr"], "i-4711");
        assert_eq!(value["delivery-date"], "2026-08-21");
        assert_eq!(value["sdkType"], "mgw-sdk-rust");
        assert_eq!(value["sdkVersion"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_reserved_keys_cannot_be_custom() {
        let mut metadata = Metadata::new();
        metadata.insert("shopType", "spoofed").insert("sdkVersion", "0.0.0");
        assert!(metadata.get("shopType").is_none());
        assert!(metadata.get("sdkVersion").is_none());
    }

    #[test]
    fn test_handle_response_splits_fixed_from_custom() {
        let mut metadata = Metadata::new();
        metadata.handle_response(
            &json!({
                "id": "s-mtd-1",
                "shopType": "magento",
                "sdkType": "other-sdk",
                "coupon": "SUMMER26"
            }),
            HttpMethod::Get,
        );

        assert_eq!(metadata.shop_type.as_deref(), Some("magento"));
        assert_eq!(metadata.get("coupon"), Some("SUMMER26"));
        assert!(metadata.get("id").is_none());
        assert!(metadata.get("sdkType").is_none());
    }

    #[test]
    fn test_resource_path() {
        assert_eq!(Metadata::new().resource_path(), "metadata");
    }
}

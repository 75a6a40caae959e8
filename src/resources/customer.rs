//! Customer resource.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Resource, json};
use crate::{adapter::HttpMethod, error::Result};

/// Salutation of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Salutation {
    /// Male salutation.
    Mr,
    /// Female salutation.
    Mrs,
    /// Not specified.
    Unknown,
}

/// Postal address used for billing and shipping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Addressee name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Street and house number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A customer known to the gateway.
///
/// `customer_id` is the merchant's own identifier; the gateway assigns the
/// resource `id` (`s-cst-…`) on creation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_serializing)]
    id: Option<String>,

    /// Merchant-side customer identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    /// Salutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salutation: Option<Salutation>,
    /// Company name for B2B customers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Landline phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Mobile phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    /// Shipping address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}

impl Customer {
    /// Creates a customer with the given name.
    #[must_use]
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: Some(firstname.into()),
            lastname: Some(lastname.into()),
            ..Self::default()
        }
    }
}

impl Resource for Customer {
    fn resource_path(&self) -> String {
        "customers".to_owned()
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
        json::merge_str(&mut self.customer_id, body, "customerId");
        json::merge_str(&mut self.firstname, body, "firstname");
        json::merge_str(&mut self.lastname, body, "lastname");
        json::merge_str(&mut self.company, body, "company");
        json::merge_str(&mut self.email, body, "email");
        json::merge_str(&mut self.phone, body, "phone");
        json::merge_str(&mut self.mobile, body, "mobile");

        if let Some(salutation) = body.get("salutation").and_then(Value::as_str) {
            if let Ok(parsed) = serde_json::from_value(Value::from(salutation)) {
                self.salutation = Some(parsed);
            }
        }
        if let Some(birth_date) = body.get("birthDate").and_then(Value::as_str) {
            if let Ok(parsed) = birth_date.parse() {
                self.birth_date = Some(parsed);
            }
        }
        if let Some(address) = body.get("billingAddress") {
            if let Ok(parsed) = serde_json::from_value(address.clone()) {
                self.billing_address = Some(parsed);
            }
        }
        if let Some(address) = body.get("shippingAddress") {
            if let Ok(parsed) = serde_json::from_value(address.clone()) {
                self.shipping_address = Some(parsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_expose_skips_unset_fields() {
        let customer = Customer::new("Linda", "Heideich");
        let value = customer.expose().unwrap();
        assert_eq!(value, json!({"firstname": "Linda", "lastname": "Heideich"}));
    }

    #[test]
    fn test_expose_camel_cases_wire_names() {
        let mut customer = Customer::new("Max", "Musterfrau");
        customer.customer_id = Some("cust-77".to_owned());
        customer.birth_date = Some(NaiveDate::from_ymd_opt(1989, 12, 24).unwrap());
        customer.billing_address = Some(Address {
            street: Some("Vangerowstr. 18".to_owned()),
            zip: Some("69115".to_owned()),
            city: Some("Heidelberg".to_owned()),
            country: Some("DE".to_owned()),
            ..Address::default()
        });

        let value = customer.expose().unwrap();
        assert_eq!(value["customerId"], "cust-77");
        assert_eq!(value["birthDate"], "1989-12-24");
        assert_eq!(value["billingAddress"]["zip"], "69115");
        assert!(value.get("id").is_none(), "resource id never goes into the payload");
    }

    #[test]
    fn test_handle_response_maps_fields() {
        let mut customer = Customer::default();
        customer.handle_response(
            &json!({
                "id": "s-cst-50",
                "firstname": "Peter",
                "lastname": "Universum",
                "salutation": "mr",
                "birthDate": "1989-12-24",
                "email": "peter@universum.example",
                "billingAddress": {"city": "Heidelberg", "country": "DE"}
            }),
            HttpMethod::Get,
        );

        assert_eq!(customer.firstname.as_deref(), Some("Peter"));
        assert_eq!(customer.salutation, Some(Salutation::Mr));
        assert_eq!(customer.birth_date, NaiveDate::from_ymd_opt(1989, 12, 24));
        let billing = customer.billing_address.unwrap();
        assert_eq!(billing.city.as_deref(), Some("Heidelberg"));
        assert_eq!(billing.country.as_deref(), Some("DE"));
    }

    #[test]
    fn test_handle_response_merges() {
        let mut customer = Customer::new("Linda", "Heideich");
        customer.email = Some("linda@example.com".to_owned());
        customer.handle_response(&json!({"lastname": "Heideich-Fischer"}), HttpMethod::Get);

        assert_eq!(customer.firstname.as_deref(), Some("Linda"));
        assert_eq!(customer.lastname.as_deref(), Some("Heideich-Fischer"));
        assert_eq!(customer.email.as_deref(), Some("linda@example.com"));
    }

    #[test]
    fn test_invalid_birth_date_is_ignored() {
        let mut customer = Customer::default();
        customer.handle_response(&json!({"birthDate": "not-a-date"}), HttpMethod::Get);
        assert!(customer.birth_date.is_none());
    }

    #[test]
    fn test_resource_path() {
        assert_eq!(Customer::default().resource_path(), "customers");
    }
}

//! Hosted payment page resource.
//!
//! The paypage is configured with amount, layout and link fields, created
//! under `paypage/charge` or `paypage/authorize`, and answers with a
//! `redirectUrl` the shop forwards the customer to. Initializing a paypage
//! implicitly creates a payment; its id arrives in `resources.paymentId`,
//! and on every non-GET response the linked payment is re-fetched so its
//! transaction state is current.

use rust_decimal::Decimal;
use serde_json::Value;

use super::{Payment, Resource, ResourceIds, json, transactions::kinds};
use crate::{adapter::HttpMethod, error::Result};

/// Transaction mode the paypage runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaypageAction {
    /// Customers are charged directly (default).
    #[default]
    Charge,
    /// Amounts are only authorized; capture happens later.
    Authorize,
}

impl PaypageAction {
    /// The vendor transaction type name of this action.
    #[must_use]
    pub const fn as_kind(self) -> &'static str {
        match self {
            Self::Charge => kinds::CHARGE,
            Self::Authorize => kinds::AUTHORIZE,
        }
    }

    fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            kinds::CHARGE => Some(Self::Charge),
            kinds::AUTHORIZE => Some(Self::Authorize),
            _ => None,
        }
    }
}

/// Hosted payment page configuration and state.
#[derive(Debug, Clone, Default)]
pub struct Paypage {
    id: Option<String>,

    /// Amount presented on the page.
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// URL the customer returns to after paying.
    pub return_url: Option<String>,
    /// Transaction mode; determines the creation endpoint.
    pub action: PaypageAction,
    /// URL of the hosted page, assigned by the gateway.
    pub redirect_url: Option<String>,

    /// Background image of the page.
    pub full_page_image: Option<String>,
    /// Shop logo shown on the page.
    pub logo_image: Option<String>,
    /// Shop name shown on the page.
    pub shop_name: Option<String>,
    /// Shop description shown on the page.
    pub shop_description: Option<String>,
    /// Tagline shown under the shop name.
    pub tagline: Option<String>,

    /// Link to the shop's contact page.
    pub contact_url: Option<String>,
    /// Link to the shop's help page.
    pub help_url: Option<String>,
    /// Link to the shop's imprint.
    pub imprint_url: Option<String>,
    /// Link to the shop's privacy policy.
    pub privacy_policy_url: Option<String>,
    /// Link to the shop's terms and conditions.
    pub terms_and_condition_url: Option<String>,

    /// Payment type names excluded from the page.
    pub excluded_types: Vec<String>,
    /// Ids of the linked customer/basket/metadata.
    pub resources: ResourceIds,
    /// The payment created for this paypage.
    pub payment: Option<Payment>,
}

impl Paypage {
    /// Creates a paypage over `amount` in `currency`.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>, return_url: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            return_url: Some(return_url.into()),
            ..Self::default()
        }
    }

    /// Id of the payment linked to this paypage.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment.as_ref().and_then(Payment::id)
    }
}

fn insert_str(payload: &mut serde_json::Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        payload.insert(key.to_owned(), Value::from(value.clone()));
    }
}

impl Resource for Paypage {
    fn resource_path(&self) -> String {
        format!("paypage/{}", self.action.as_kind())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn expose(&self) -> Result<Value> {
        let mut payload = serde_json::Map::new();
        if let Some(amount) = self.amount {
            payload.insert("amount".to_owned(), serde_json::to_value(amount)?);
        }
        insert_str(&mut payload, "currency", &self.currency);
        insert_str(&mut payload, "returnUrl", &self.return_url);
        insert_str(&mut payload, "fullPageImage", &self.full_page_image);
        insert_str(&mut payload, "logoImage", &self.logo_image);
        insert_str(&mut payload, "shopName", &self.shop_name);
        insert_str(&mut payload, "shopDescription", &self.shop_description);
        insert_str(&mut payload, "tagline", &self.tagline);
        insert_str(&mut payload, "contactUrl", &self.contact_url);
        insert_str(&mut payload, "helpUrl", &self.help_url);
        insert_str(&mut payload, "imprintUrl", &self.imprint_url);
        insert_str(&mut payload, "privacyPolicyUrl", &self.privacy_policy_url);
        insert_str(&mut payload, "termsAndConditionUrl", &self.terms_and_condition_url);
        if !self.excluded_types.is_empty() {
            payload.insert("excludeTypes".to_owned(), serde_json::to_value(&self.excluded_types)?);
        }
        if !self.resources.is_empty() {
            payload.insert("resources".to_owned(), serde_json::to_value(&self.resources)?);
        }
        Ok(Value::Object(payload))
    }

    fn handle_response(&mut self, body: &Value, _method: HttpMethod) {
        json::merge_decimal(&mut self.amount, body, "amount");
        json::merge_str(&mut self.currency, body, "currency");
        json::merge_str(&mut self.return_url, body, "returnUrl");
        json::merge_str(&mut self.redirect_url, body, "redirectUrl");
        json::merge_str(&mut self.full_page_image, body, "fullPageImage");
        json::merge_str(&mut self.logo_image, body, "logoImage");
        json::merge_str(&mut self.shop_name, body, "shopName");
        json::merge_str(&mut self.shop_description, body, "shopDescription");
        json::merge_str(&mut self.tagline, body, "tagline");
        json::merge_str(&mut self.contact_url, body, "contactUrl");
        json::merge_str(&mut self.help_url, body, "helpUrl");
        json::merge_str(&mut self.privacy_policy_url, body, "privacyPolicyUrl");
        json::merge_str(&mut self.terms_and_condition_url, body, "termsAndConditionUrl");

        // Legacy field name still sent by older gateway versions.
        json::merge_str(&mut self.imprint_url, body, "impressumUrl");
        json::merge_str(&mut self.imprint_url, body, "imprintUrl");

        if let Some(action) = body
            .get("action")
            .and_then(Value::as_str)
            .and_then(PaypageAction::from_kind)
        {
            self.action = action;
        }

        self.resources.merge_from(body);
        if let Some(payment_id) = self.resources.payment_id.clone() {
            match &mut self.payment {
                Some(payment) => payment.set_id(payment_id),
                None => self.payment = Some(Payment::with_id(payment_id)),
            }
        }
    }

    fn payment_to_refresh(&self, method: HttpMethod) -> Option<String> {
        if method == HttpMethod::Get {
            return None;
        }
        self.payment_id().map(str::to_owned)
    }

    fn attach_refreshed_payment(&mut self, payment: Payment) {
        self.payment = Some(payment);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn paypage() -> Paypage {
        Paypage::new("123.40".parse().unwrap(), "EUR", "https://shop.example/return")
    }

    #[test]
    fn test_defaults() {
        let page = paypage();
        assert_eq!(page.action, PaypageAction::Charge);
        assert_eq!(page.resource_path(), "paypage/charge");
        assert!(page.payment_id().is_none());
        assert!(page.redirect_url.is_none());
    }

    #[test]
    fn test_authorize_action_changes_path() {
        let mut page = paypage();
        page.action = PaypageAction::Authorize;
        assert_eq!(page.resource_path(), "paypage/authorize");
    }

    #[test]
    fn test_expose_contains_configured_fields_only() {
        let mut page = paypage();
        page.shop_name = Some("My Shop".to_owned());
        page.tagline = Some("Best shop in town".to_owned());
        page.excluded_types = vec!["paypal".to_owned()];
        page.resources.customer_id = Some("s-cst-1".to_owned());

        let value = page.expose().unwrap();
        assert_eq!(value["amount"], json!(123.4));
        assert_eq!(value["currency"], "EUR");
        assert_eq!(value["shopName"], "My Shop");
        assert_eq!(value["excludeTypes"], json!(["paypal"]));
        assert_eq!(value["resources"]["customerId"], "s-cst-1");
        assert!(value.get("logoImage").is_none());
        assert!(value.get("redirectUrl").is_none());
    }

    #[test]
    fn test_handle_response_maps_every_field() {
        let mut page = paypage();
        page.handle_response(
            &json!({
                "amount": 765.4,
                "currency": "CHF",
                "returnUrl": "another return url",
                "action": "authorize",
                "redirectUrl": "redirect url",
                "fullPageImage": "full page image",
                "logoImage": "logo image",
                "shopDescription": "shop description",
                "shopName": "shop name",
                "tagline": "tagline",
                "contactUrl": "contact url",
                "helpUrl": "help url",
                "imprintUrl": "imprint url",
                "privacyPolicyUrl": "privacy policy url",
                "termsAndConditionUrl": "tac url"
            }),
            HttpMethod::Post,
        );

        assert_eq!(page.amount, Some("765.4".parse().unwrap()));
        assert_eq!(page.currency.as_deref(), Some("CHF"));
        assert_eq!(page.return_url.as_deref(), Some("another return url"));
        assert_eq!(page.action, PaypageAction::Authorize);
        assert_eq!(page.redirect_url.as_deref(), Some("redirect url"));
        assert_eq!(page.full_page_image.as_deref(), Some("full page image"));
        assert_eq!(page.logo_image.as_deref(), Some("logo image"));
        assert_eq!(page.shop_description.as_deref(), Some("shop description"));
        assert_eq!(page.shop_name.as_deref(), Some("shop name"));
        assert_eq!(page.tagline.as_deref(), Some("tagline"));
        assert_eq!(page.contact_url.as_deref(), Some("contact url"));
        assert_eq!(page.help_url.as_deref(), Some("help url"));
        assert_eq!(page.imprint_url.as_deref(), Some("imprint url"));
        assert_eq!(page.privacy_policy_url.as_deref(), Some("privacy policy url"));
        assert_eq!(page.terms_and_condition_url.as_deref(), Some("tac url"));
    }

    #[test]
    fn test_handle_response_maps_legacy_impressum_alias() {
        let mut page = paypage();
        page.handle_response(&json!({"impressumUrl": "impressum url"}), HttpMethod::Post);
        assert_eq!(page.imprint_url.as_deref(), Some("impressum url"));

        // The current field name wins when both are present.
        page.handle_response(
            &json!({"impressumUrl": "old", "imprintUrl": "new"}),
            HttpMethod::Post,
        );
        assert_eq!(page.imprint_url.as_deref(), Some("new"));
    }

    #[test]
    fn test_payment_id_arrives_via_resources() {
        let mut page = paypage();
        page.payment = Some(Payment::new());
        assert!(page.payment_id().is_none());

        page.handle_response(
            &json!({"resources": {"paymentId": "s-pay-99"}}),
            HttpMethod::Post,
        );
        assert_eq!(page.payment_id(), Some("s-pay-99"));
    }

    #[test]
    fn test_payment_shell_created_when_missing() {
        let mut page = paypage();
        assert!(page.payment.is_none());
        page.handle_response(
            &json!({"resources": {"paymentId": "s-pay-7"}}),
            HttpMethod::Post,
        );
        assert_eq!(page.payment_id(), Some("s-pay-7"));
    }

    #[test]
    fn test_payment_refresh_only_for_non_get() {
        let mut page = paypage();
        page.payment = Some(Payment::with_id("s-pay-1"));

        assert_eq!(page.payment_to_refresh(HttpMethod::Get), None);
        assert_eq!(page.payment_to_refresh(HttpMethod::Post).as_deref(), Some("s-pay-1"));
        assert_eq!(page.payment_to_refresh(HttpMethod::Put).as_deref(), Some("s-pay-1"));
        assert_eq!(page.payment_to_refresh(HttpMethod::Delete).as_deref(), Some("s-pay-1"));
    }

    #[test]
    fn test_no_refresh_without_payment() {
        let page = paypage();
        assert_eq!(page.payment_to_refresh(HttpMethod::Post), None);
    }

    #[test]
    fn test_attach_refreshed_payment() {
        let mut page = paypage();
        let mut payment = Payment::with_id("s-pay-1");
        payment.order_id = Some("o-1".to_owned());
        page.attach_refreshed_payment(payment);
        assert_eq!(page.payment_id(), Some("s-pay-1"));
        assert_eq!(page.payment.as_ref().unwrap().order_id.as_deref(), Some("o-1"));
    }
}

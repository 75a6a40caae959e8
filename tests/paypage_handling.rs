//! Hosted payment page flows: initialization, response mapping, and the
//! conditional payment re-fetch on non-GET responses.

mod common;

use common::{MockAdapter, client_with};
use mgw_sdk::{
    adapter::HttpMethod,
    resources::{Customer, Payment, PaymentState, Paypage, PaypageAction, Resource},
};
use serde_json::json;

fn paypage() -> Paypage {
    Paypage::new("123.40".parse().unwrap(), "EUR", "https://shop.example/return")
}

#[tokio::test]
async fn init_pay_page_charge_posts_and_refreshes_payment() {
    let adapter = MockAdapter::new();
    adapter.push(201, json!({
        "id": "s-ppg-1",
        "redirectUrl": "https://pay.mgw-gateway.com/s-ppg-1",
        "resources": {"paymentId": "s-pay-99"}
    }));
    adapter.push(200, json!({
        "id": "s-pay-99",
        "state": {"id": 0, "name": "pending"},
        "amount": {"total": 123.4, "remaining": 123.4, "currency": "EUR"}
    }));
    let client = client_with(adapter.clone());

    let page = client.init_pay_page_charge(paypage(), None, None, None).await.unwrap();

    let requests = adapter.requests();
    assert_eq!(requests.len(), 2, "create + payment refresh");
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert!(requests[0].url.ends_with("/v1/paypage/charge"), "was {}", requests[0].url);
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert!(requests[1].url.ends_with("/v1/payments/s-pay-99"), "was {}", requests[1].url);

    assert_eq!(page.id(), Some("s-ppg-1"));
    assert_eq!(page.redirect_url.as_deref(), Some("https://pay.mgw-gateway.com/s-ppg-1"));
    assert_eq!(page.payment_id(), Some("s-pay-99"));
    let payment = page.payment.as_ref().expect("payment attached after refresh");
    assert_eq!(payment.state, PaymentState::Pending);
    assert_eq!(payment.amount.total, Some("123.4".parse().unwrap()));
}

#[tokio::test]
async fn init_pay_page_authorize_uses_authorize_endpoint() {
    let adapter = MockAdapter::new();
    adapter.push(201, json!({
        "id": "s-ppg-2",
        "resources": {"paymentId": "s-pay-100"}
    }));
    adapter.push(200, json!({"id": "s-pay-100", "state": {"id": 0}}));
    let client = client_with(adapter.clone());

    let page = client.init_pay_page_authorize(paypage(), None, None, None).await.unwrap();

    let requests = adapter.requests();
    assert!(requests[0].url.ends_with("/v1/paypage/authorize"), "was {}", requests[0].url);
    assert_eq!(page.action, PaypageAction::Authorize);
}

#[tokio::test]
async fn init_pay_page_creates_linked_customer_first() {
    let adapter = MockAdapter::new();
    adapter.push(201, json!({"id": "s-cst-5"}));
    adapter.push(201, json!({
        "id": "s-ppg-3",
        "resources": {"paymentId": "s-pay-101"}
    }));
    adapter.push(200, json!({"id": "s-pay-101"}));
    let client = client_with(adapter.clone());

    let mut page = paypage();
    page.shop_name = Some("My Shop".to_owned());
    let page = client
        .init_pay_page_charge(page, Some(Customer::new("Linda", "Heideich")), None, None)
        .await
        .unwrap();

    let requests = adapter.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].url.ends_with("/v1/customers"));
    let paypage_payload = requests[1].body.as_ref().unwrap();
    assert_eq!(paypage_payload["resources"]["customerId"], "s-cst-5");
    assert_eq!(paypage_payload["shopName"], "My Shop");
    assert_eq!(paypage_payload["amount"], json!(123.4));
    assert_eq!(page.resources.customer_id.as_deref(), Some("s-cst-5"));
}

#[tokio::test]
async fn fetching_a_paypage_does_not_refresh_the_payment() {
    let adapter = MockAdapter::new();
    adapter.push(200, json!({
        "redirectUrl": "https://pay.mgw-gateway.com/s-ppg-1",
        "resources": {"paymentId": "s-pay-99"}
    }));
    let client = client_with(adapter.clone());

    let mut page = paypage();
    page.set_id("s-ppg-1".to_owned());
    page.payment = Some(Payment::with_id("s-pay-99"));
    client.resources().fetch(&mut page).await.unwrap();

    let requests = adapter.requests();
    assert_eq!(requests.len(), 1, "GET must not trigger a payment refresh");
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(page.redirect_url.as_deref(), Some("https://pay.mgw-gateway.com/s-ppg-1"));
}

#[tokio::test]
async fn legacy_impressum_alias_maps_onto_imprint_url() {
    let adapter = MockAdapter::new();
    adapter.push(201, json!({
        "id": "s-ppg-4",
        "impressumUrl": "https://shop.example/impressum",
        "resources": {"paymentId": "s-pay-102"}
    }));
    adapter.push(200, json!({"id": "s-pay-102"}));
    let client = client_with(adapter.clone());

    let page = client.init_pay_page_charge(paypage(), None, None, None).await.unwrap();
    assert_eq!(page.imprint_url.as_deref(), Some("https://shop.example/impressum"));
}

#[tokio::test]
async fn paypage_error_response_skips_payment_refresh() {
    let adapter = MockAdapter::new();
    adapter.push(400, json!({
        "errors": [{
            "code": "API.700.400.700",
            "merchantMessage": "Amount is missing.",
            "customerMessage": "Something went wrong."
        }]
    }));
    let client = client_with(adapter.clone());

    let result = client.init_pay_page_charge(paypage(), None, None, None).await;
    assert!(result.is_err());
    assert_eq!(adapter.requests().len(), 1, "no refresh after a failed create");
}

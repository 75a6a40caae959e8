//! CRUD primitives for gateway resources.
//!
//! The resource service turns a typed resource into a request (path,
//! method, payload), runs it through the adapter, surfaces gateway errors,
//! and maps the response back onto the resource's fields.

use serde_json::Value;
use tracing::instrument;

use crate::{
    adapter::{AdapterResponse, HttpAdapter, HttpMethod, build_url},
    config::GatewayConfig,
    error::{MgwError, Result},
    reliability::{is_retryable, retry_with_backoff},
    resources::{
        Basket, Charge, Customer, Keypair, Payment, PaymentType, Resource, json,
    },
};

/// Create/fetch/update/delete primitives shared by all resources.
#[derive(Debug, Clone, Copy)]
pub struct ResourceService<'a, A: HttpAdapter> {
    adapter: &'a A,
    config: &'a GatewayConfig,
}

impl<'a, A: HttpAdapter> ResourceService<'a, A> {
    /// Creates a service borrowing the client's adapter and configuration.
    #[must_use]
    pub fn new(adapter: &'a A, config: &'a GatewayConfig) -> Self {
        Self { adapter, config }
    }

    /// Parses an adapter response and surfaces gateway-reported failures.
    ///
    /// A body carrying an `errors` array is an error regardless of HTTP
    /// status; so is a non-2xx status without a parseable error body, and
    /// a 2xx body flagged `isError` without error details.
    fn interpret(response: &AdapterResponse) -> Result<Value> {
        let trimmed = response.body.trim();
        let body: Value = if trimmed.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            match serde_json::from_str(trimmed) {
                Ok(body) => body,
                Err(e) if response.is_success() => return Err(MgwError::Json(e)),
                Err(_) => {
                    return Err(MgwError::UnexpectedResponse(format!(
                        "status {} with non-JSON body",
                        response.status
                    )));
                }
            }
        };

        if let Some(error) = MgwError::from_api_body(&body) {
            return Err(error);
        }
        if !response.is_success() {
            return Err(MgwError::UnexpectedResponse(format!(
                "status {} without error details",
                response.status
            )));
        }
        if json::bool_flag(&body, "isError") {
            return Err(MgwError::UnexpectedResponse(
                "response flagged isError without error details".to_owned(),
            ));
        }
        Ok(body)
    }

    fn request_url<R: Resource + ?Sized>(&self, resource: &R, with_id: bool) -> Result<String> {
        let mut url = build_url(&self.config.base_url, &resource.resource_path())?;
        if with_id {
            if let Some(id) = resource.id() {
                url.push('/');
                url.push_str(id);
            }
        }
        Ok(url)
    }

    /// Creates `resource` at the gateway and maps the response back.
    ///
    /// The id assigned by the gateway is stored on the resource before
    /// response handling runs.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, resource), fields(path = %resource.resource_path()))]
    pub async fn create<R: Resource + ?Sized>(&self, resource: &mut R) -> Result<()> {
        let payload = resource.expose()?;
        let url = self.request_url(resource, false)?;
        let response = self.adapter.send(HttpMethod::Post, &url, Some(&payload), self.config).await?;
        self.apply(resource, &response, HttpMethod::Post).await
    }

    /// Fetches the current gateway state of `resource`.
    ///
    /// Runs under the configured retry policy since GET is idempotent.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, resource), fields(path = %resource.resource_path()))]
    pub async fn fetch<R: Resource + ?Sized>(&self, resource: &mut R) -> Result<()> {
        let response = self.fetch_raw(resource).await?;
        self.apply(resource, &response, HttpMethod::Get).await
    }

    /// Updates `resource` at the gateway via PUT.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::MissingResourceId`] when the resource has no id
    /// yet; gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, resource), fields(path = %resource.resource_path()))]
    pub async fn update<R: Resource + ?Sized>(&self, resource: &mut R) -> Result<()> {
        if resource.id().is_none() {
            return Err(MgwError::MissingResourceId("resource"));
        }
        let payload = resource.expose()?;
        let url = self.request_url(resource, true)?;
        let response = self.adapter.send(HttpMethod::Put, &url, Some(&payload), self.config).await?;
        self.apply(resource, &response, HttpMethod::Put).await
    }

    /// Deletes `resource` at the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::MissingResourceId`] when the resource has no id
    /// yet; gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, resource), fields(path = %resource.resource_path()))]
    pub async fn delete<R: Resource + ?Sized>(&self, resource: &mut R) -> Result<()> {
        if resource.id().is_none() {
            return Err(MgwError::MissingResourceId("resource"));
        }
        let url = self.request_url(resource, true)?;
        let response = self.adapter.send(HttpMethod::Delete, &url, None, self.config).await?;
        self.apply(resource, &response, HttpMethod::Delete).await
    }

    async fn fetch_raw<R: Resource + ?Sized>(&self, resource: &R) -> Result<AdapterResponse> {
        let url = self.request_url(resource, true)?;
        retry_with_backoff(&self.config.retry, is_retryable, || {
            self.adapter.send(HttpMethod::Get, &url, None, self.config)
        })
        .await
    }

    /// Interprets `response`, maps it onto `resource`, and honors the
    /// resource's follow-up hook (the paypage's conditional payment
    /// refresh).
    async fn apply<R: Resource + ?Sized>(
        &self,
        resource: &mut R,
        response: &AdapterResponse,
        method: HttpMethod,
    ) -> Result<()> {
        let body = Self::interpret(response)?;

        if resource.id().is_none() {
            if let Some(id) = body.get("id").and_then(Value::as_str) {
                resource.set_id(id.to_owned());
            }
        }
        resource.handle_response(&body, method);

        if let Some(payment_id) = resource.payment_to_refresh(method) {
            let mut payment = Payment::with_id(payment_id);
            let response = self.fetch_raw(&payment).await?;
            let body = Self::interpret(&response)?;
            payment.handle_response(&body, HttpMethod::Get);
            resource.attach_refreshed_payment(payment);
        }
        Ok(())
    }

    /// Fetches a payment by id.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        let mut payment = Payment::with_id(payment_id);
        self.fetch(&mut payment).await?;
        Ok(payment)
    }

    /// Fetches a payment type by id; the kind is dispatched from the short
    /// code embedded in the id.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::UnexpectedResponse`] for ids with unknown short
    /// codes.
    pub async fn fetch_payment_type(&self, type_id: &str) -> Result<PaymentType> {
        let mut payment_type = PaymentType::from_type_id(type_id)?;
        self.fetch(&mut payment_type).await?;
        Ok(payment_type)
    }

    /// Fetches a customer by gateway id.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    pub async fn fetch_customer(&self, customer_id: &str) -> Result<Customer> {
        let mut customer = Customer::default();
        customer.set_id(customer_id.to_owned());
        self.fetch(&mut customer).await?;
        Ok(customer)
    }

    /// Fetches a basket by id.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    pub async fn fetch_basket(&self, basket_id: &str) -> Result<Basket> {
        let mut basket = Basket::default();
        basket.set_id(basket_id.to_owned());
        self.fetch(&mut basket).await?;
        Ok(basket)
    }

    /// Fetches the keypair information for the configured private key.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    pub async fn fetch_keypair(&self) -> Result<Keypair> {
        let mut keypair = Keypair::new();
        self.fetch(&mut keypair).await?;
        Ok(keypair)
    }

    /// Fetches a single charge of a payment.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    pub async fn fetch_charge(&self, payment_id: &str, charge_id: &str) -> Result<Charge> {
        let mut charge = Charge::capture(payment_id, None);
        charge.set_id(charge_id.to_owned());
        self.fetch(&mut charge).await?;
        Ok(charge)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: Value) -> AdapterResponse {
        AdapterResponse { status, body: body.to_string() }
    }

    type Service<'a> = ResourceService<'a, crate::adapter::ReqwestAdapter>;

    #[test]
    fn test_interpret_success() {
        let body = Service::interpret(&response(200, json!({"id": "s-cst-1"}))).unwrap();
        assert_eq!(body["id"], "s-cst-1");
    }

    #[test]
    fn test_interpret_empty_body() {
        let body =
            Service::interpret(&AdapterResponse { status: 204, body: "  ".to_owned() }).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_interpret_error_body_wins_even_on_2xx() {
        let result = Service::interpret(&response(
            200,
            json!({
                "isError": true,
                "errors": [{"code": "API.410.200.010", "merchantMessage": "bad json"}]
            }),
        ));
        let Err(MgwError::Api { code, .. }) = result else {
            panic!("expected Api error");
        };
        assert_eq!(code, "API.410.200.010");
    }

    #[test]
    fn test_interpret_http_error_without_details() {
        let result = Service::interpret(&response(502, json!({"oops": true})));
        assert!(matches!(result, Err(MgwError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_interpret_non_json_error_body() {
        let result = Service::interpret(&AdapterResponse {
            status: 502,
            body: "<html>Bad Gateway</html>".to_owned(),
        });
        assert!(matches!(result, Err(MgwError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_interpret_non_json_success_body() {
        let result =
            Service::interpret(&AdapterResponse { status: 200, body: "not json".to_owned() });
        assert!(matches!(result, Err(MgwError::Json(_))));
    }

    #[test]
    fn test_interpret_is_error_flag_without_details() {
        let result = Service::interpret(&response(200, json!({"isError": true})));
        assert!(matches!(result, Err(MgwError::UnexpectedResponse(_))));
    }
}

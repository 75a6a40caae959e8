//! Shared test double: a scripted HTTP adapter recording every request.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use mgw_sdk::{
    MgwClient,
    adapter::{AdapterResponse, HttpAdapter, HttpMethod},
    config::GatewayConfig,
};
use serde_json::Value;

/// One request the SDK sent through the adapter.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct Inner {
    responses: Mutex<VecDeque<AdapterResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Adapter returning scripted responses in order.
#[derive(Debug, Default, Clone)]
pub struct MockAdapter {
    inner: Arc<Inner>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response.
    pub fn push(&self, status: u16, body: Value) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .push_back(AdapterResponse { status, body: body.to_string() });
    }

    /// Everything the SDK sent so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

impl HttpAdapter for MockAdapter {
    async fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
        body: Option<&'a Value>,
        _config: &'a GatewayConfig,
    ) -> mgw_sdk::Result<AdapterResponse> {
        self.inner.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_owned(),
            body: body.cloned(),
        });
        let response = self
            .inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted request: {method} {url}"));
        Ok(response)
    }
}

/// A client wired to the mock adapter with a sandbox test key.
pub fn client_with(adapter: MockAdapter) -> MgwClient<MockAdapter> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    MgwClient::with_adapter(GatewayConfig::new("s-priv-testkey123"), adapter)
        .expect("test config is valid")
}

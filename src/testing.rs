//! Scripted `HttpTransport` for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::DefiLlamaClient;
use crate::config::RetryPolicy;
use crate::error::Result;
use crate::transport::{HttpTransport, RawResponse};

type Request = (String, Vec<(String, String)>);

/// Responses are queued per URL; the last one keeps being served.
/// Unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<RawResponse>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: &str, status: u16, body: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(RawResponse::new(status, body));
        self
    }

    pub fn route_json(self, url: &str, value: Value) -> Self {
        let body = value.to_string();
        self.route(url, 200, &body)
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|(u, _)| u == url).count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, q)| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), query.to_vec()));
        let mut routes = self.routes.lock().unwrap();
        let response = match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => RawResponse::new(404, format!("no route for {}", url)),
        };
        Ok(response)
    }
}

pub(crate) fn client_with(mock: &Arc<MockTransport>) -> DefiLlamaClient {
    DefiLlamaClient::with_transport(mock.clone()).with_retry_policy(RetryPolicy::immediate(5))
}

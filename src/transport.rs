use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::config::{default_user_agent, RetryPolicy, REQUEST_TIMEOUT};
use crate::error::{LlamaError, Result};

/// Status and body of one GET, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single HTTP GET. Implementations must not retry or interpret the status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(headers: &HashMap<String, String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(build_headers(headers)?)
            .build()
            .map_err(|e| LlamaError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn build_headers(extra: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let agent = HeaderValue::from_str(&default_user_agent())
        .map_err(|e| LlamaError::Configuration(format!("invalid user agent: {}", e)))?;
    headers.insert(USER_AGENT, agent);
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| LlamaError::Configuration(format!("invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| LlamaError::Configuration(format!("invalid value for header {}: {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// The transport shared by every request of one client, wrapped in the retry policy.
pub struct RetrySession {
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
}

impl RetrySession {
    pub fn new(transport: Arc<dyn HttpTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    #[cfg(test)]
    pub(crate) fn set_policy(&mut self, policy: RetryPolicy) {
        self.policy = policy;
    }

    pub async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse> {
        debug!(url, ?query, "GET");
        crate::utils::retry(
            &self.policy,
            |outcome: &Result<RawResponse>| match outcome {
                Ok(response) => self.policy.is_retryable(response.status),
                Err(LlamaError::Http(e)) => e.is_connect() || e.is_timeout() || e.is_request(),
                Err(_) => false,
            },
            || self.transport.get(url, query),
        )
        .await
    }

    pub async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        validate_response(self.get(url, query).await?)
    }
}

/// Non-2xx becomes `Transport`, an unparsable body becomes `Decode`;
/// anything else is returned exactly as decoded.
pub fn validate_response(response: RawResponse) -> Result<Value> {
    if !response.is_success() {
        return Err(LlamaError::Transport {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|_| LlamaError::Decode {
        body: response.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use serde_json::json;

    const URL: &str = "https://api.llama.fi/protocols";

    fn session(mock: &Arc<MockTransport>) -> RetrySession {
        RetrySession::new(mock.clone(), RetryPolicy::immediate(5))
    }

    #[test]
    fn test_validate_response_passes_json_through() {
        let value = validate_response(RawResponse::new(200, r#"{"key": "value"}"#)).unwrap();
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn test_validate_response_rejects_status() {
        let err = validate_response(RawResponse::new(404, "missing")).unwrap_err();
        match err {
            LlamaError::Transport { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "missing");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_response_keeps_raw_text_on_decode_failure() {
        let err = validate_response(RawResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(&err, LlamaError::Decode { body } if body == "not json"));
        assert!(err.to_string().contains("not json"));
    }

    #[tokio::test]
    async fn test_retry_budget_is_finite() {
        let mock = Arc::new(MockTransport::new().route(URL, 500, "boom"));
        let err = session(&mock).get_json(URL, &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(mock.calls_to(URL), 6);
    }

    #[tokio::test]
    async fn test_transient_status_recovers() {
        let mock = Arc::new(
            MockTransport::new()
                .route(URL, 503, "busy")
                .route(URL, 406, "busy")
                .route(URL, 200, "[1, 2]"),
        );
        let value = session(&mock).get_json(URL, &[]).await.unwrap();
        assert_eq!(value, json!([1, 2]));
        assert_eq!(mock.calls_to(URL), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_status_fails_immediately() {
        let mock = Arc::new(MockTransport::new().route(URL, 404, "nope"));
        let err = session(&mock).get_json(URL, &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.calls_to(URL), 1);
    }

    #[tokio::test]
    async fn test_query_is_forwarded() {
        let mock = Arc::new(MockTransport::new().route(URL, 200, "{}"));
        let query = vec![("includePrices".to_string(), "true".to_string())];
        session(&mock).get_json(URL, &query).await.unwrap();
        assert_eq!(mock.requests()[0].1, query);
    }

    #[test]
    fn test_build_headers_merges_and_validates() {
        let mut extra = HashMap::new();
        extra.insert("User-Agent".to_string(), "custom/1.0".to_string());
        extra.insert("x-api-key".to_string(), "secret".to_string());
        let headers = build_headers(&extra).unwrap();
        assert_eq!(headers[USER_AGENT], "custom/1.0");
        assert_eq!(headers["x-api-key"], "secret");

        let mut bad = HashMap::new();
        bad.insert("bad header".to_string(), "v".to_string());
        assert!(matches!(build_headers(&bad), Err(LlamaError::Configuration(_))));
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{Category, ReferenceCache};
use crate::config::RetryPolicy;
use crate::error::{LlamaError, Result};
use crate::request::ApiRequest;
use crate::resolver::{resolve_member, resolve_named, Identifier};
use crate::transport::{HttpTransport, ReqwestTransport, RetrySession};

/// Entry point for every DefiLlama API call.
///
/// Owns one retrying HTTP session and its own reference listings. Listings are
/// loaded lazily and never refreshed; build a new client to see upstream changes.
pub struct DefiLlamaClient {
    session: RetrySession,
    cache: ReferenceCache,
}

impl DefiLlamaClient {
    pub fn new() -> Result<Self> {
        Self::with_headers(HashMap::new())
    }

    /// Extra headers are merged over the defaults (`User-Agent` included).
    pub fn with_headers(headers: HashMap<String, String>) -> Result<Self> {
        let transport = ReqwestTransport::new(&headers)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            session: RetrySession::new(transport, RetryPolicy::default()),
            cache: ReferenceCache::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.session.set_policy(policy);
        self
    }

    pub fn session(&self) -> &RetrySession {
        &self.session
    }

    pub(crate) fn cache(&self) -> &ReferenceCache {
        &self.cache
    }

    /// Issue `request` and return the decoded JSON unchanged.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value> {
        self.session.get_json(&request.url(), request.query()).await
    }

    pub async fn execute_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.fetch_as(request, "response").await
    }

    pub(crate) async fn fetch_as<T: DeserializeOwned>(&self, request: ApiRequest, context: &'static str) -> Result<T> {
        let value = self.execute(request).await?;
        decode(value, context)
    }

    /// Issue `request` and return one top-level field of the response object.
    pub(crate) async fn execute_field(&self, request: ApiRequest, field: &'static str) -> Result<Value> {
        let value = self.execute(request).await?;
        match value {
            Value::Object(mut map) => map.remove(field).ok_or_else(|| LlamaError::Payload {
                context: field,
                source: <serde_json::Error as serde::de::Error>::missing_field(field),
            }),
            _ => Err(LlamaError::Payload {
                context: field,
                source: <serde_json::Error as serde::de::Error>::custom("expected a JSON object"),
            }),
        }
    }

    pub async fn resolve_chain(&self, chain: &str) -> Result<String> {
        resolve_member(chain, self.chains().await?, Category::Chain)
    }

    pub async fn resolve_protocol(&self, protocol: &str) -> Result<String> {
        resolve_member(protocol, self.protocols().await?, Category::Protocol)
    }

    pub async fn resolve_dex_chain(&self, chain: &str) -> Result<String> {
        resolve_member(chain, self.dex_chains().await?, Category::DexChain)
    }

    pub async fn resolve_dex_protocol(&self, protocol: &str) -> Result<String> {
        resolve_member(protocol, self.dex_protocols().await?, Category::DexProtocol)
    }

    pub async fn resolve_options_chain(&self, chain: &str) -> Result<String> {
        resolve_member(chain, self.options_chains().await?, Category::OptionsChain)
    }

    pub async fn resolve_options_protocol(&self, protocol: &str) -> Result<String> {
        resolve_member(protocol, self.options_protocols().await?, Category::OptionsProtocol)
    }

    pub async fn resolve_fees_chain(&self, chain: &str) -> Result<String> {
        resolve_member(chain, self.fees_chains().await?, Category::FeesChain)
    }

    pub async fn resolve_fees_protocol(&self, protocol: &str) -> Result<String> {
        resolve_member(protocol, self.fees_protocols().await?, Category::FeesProtocol)
    }

    /// Bridge id, from an id or a bridge name.
    pub async fn resolve_bridge(&self, bridge: impl Into<Identifier>) -> Result<u64> {
        resolve_named(&bridge.into(), self.bridges().await?, Category::Bridge)
    }

    /// Stablecoin id, from an id or a symbol.
    pub async fn resolve_stablecoin(&self, stablecoin: impl Into<Identifier>) -> Result<u64> {
        resolve_named(&stablecoin.into(), self.stablecoins().await?, Category::Stablecoin)
    }

    /// Pool id, from a pool id or a pool symbol.
    pub async fn resolve_pool(&self, pool: impl Into<Identifier>) -> Result<String> {
        resolve_named(&pool.into(), self.pools().await?, Category::Pool)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value, context: &'static str) -> Result<T> {
    serde_json::from_value(value).map_err(|source| LlamaError::Payload { context, source })
}

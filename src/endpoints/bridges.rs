use serde_json::Value;

use crate::cache::Category;
use crate::client::DefiLlamaClient;
use crate::error::Result;
use crate::request::{ApiRequest, ApiSection};
use crate::resolver::{best_effort, Identifier};

pub const DEFAULT_TRANSACTIONS_LIMIT: u32 = 200;

/// Filters for [`DefiLlamaClient::bridge_transactions`].
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeTransactionsQuery {
    pub start_timestamp: Option<i64>,
    pub end_timestamp: Option<i64>,
    /// Must be a known chain; an unknown one fails the call.
    pub source_chain: Option<String>,
    /// `{chain}:{address}`, matched against both sender and receiver.
    pub address: Option<String>,
    pub limit: u32,
}

impl Default for BridgeTransactionsQuery {
    fn default() -> Self {
        Self {
            start_timestamp: None,
            end_timestamp: None,
            source_chain: None,
            address: None,
            limit: DEFAULT_TRANSACTIONS_LIMIT,
        }
    }
}

impl DefiLlamaClient {
    /// Bridges with summaries of recent volume (`bridges`).
    pub async fn all_bridges(&self, include_chains: bool) -> Result<Value> {
        let request = ApiRequest::new(ApiSection::Bridges, "bridges").param("includeChains", include_chains);
        self.execute_field(request, "bridges").await
    }

    /// Volume summary of one bridge with its per-chain breakdown.
    pub async fn bridge(&self, bridge: impl Into<Identifier>) -> Result<Value> {
        let id = self.resolve_bridge(bridge).await?;
        self.execute(ApiRequest::new(ApiSection::Bridges, "bridge").segment(id))
            .await
    }

    /// Historical bridge volume on `chain`. An unknown `bridge` is ignored with a warning.
    pub async fn bridge_volume(&self, chain: &str, bridge: Option<Identifier>) -> Result<Value> {
        let chain = self.resolve_chain(chain).await?;
        let bridge_id = self.optional_bridge(bridge).await?;
        self.execute(
            ApiRequest::new(ApiSection::Bridges, "bridgevolume")
                .segment(chain)
                .opt_param("id", bridge_id),
        )
        .await
    }

    /// 24h token and address stats for the UTC day containing `timestamp`.
    /// An unknown `bridge` is ignored with a warning.
    pub async fn bridge_day_stats(&self, timestamp: i64, chain: &str, bridge: Option<Identifier>) -> Result<Value> {
        let chain = self.resolve_chain(chain).await?;
        let bridge_id = self.optional_bridge(bridge).await?;
        self.execute(
            ApiRequest::new(ApiSection::Bridges, "bridgedaystats")
                .segment(timestamp)
                .segment(chain)
                .opt_param("id", bridge_id),
        )
        .await
    }

    pub async fn bridge_transactions(
        &self,
        bridge: impl Into<Identifier>,
        query: BridgeTransactionsQuery,
    ) -> Result<Value> {
        let id = self.resolve_bridge(bridge).await?;
        let source_chain = match query.source_chain.as_deref() {
            Some(chain) => Some(self.resolve_chain(chain).await?),
            None => None,
        };
        self.execute(
            ApiRequest::new(ApiSection::Bridges, "transactions")
                .segment(id)
                .opt_param("starttimestamp", query.start_timestamp)
                .opt_param("endtimestamp", query.end_timestamp)
                .opt_param("sourcechain", source_chain)
                .opt_param("address", query.address)
                .param("limit", query.limit),
        )
        .await
    }

    async fn optional_bridge(&self, bridge: Option<Identifier>) -> Result<Option<u64>> {
        let Some(bridge) = bridge else {
            return Ok(None);
        };
        let outcome = self.resolve_bridge(bridge.clone()).await;
        best_effort(outcome, Category::Bridge, &bridge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_with, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    const BRIDGES_URL: &str = "https://bridges.llama.fi/bridges";
    const CHAINS_URL: &str = "https://api.llama.fi/v2/chains";

    fn mock() -> MockTransport {
        MockTransport::new()
            .route_json(
                BRIDGES_URL,
                json!({"bridges": [{"id": 1, "name": "Bridge 1"}, {"id": 2, "name": "Bridge 2"}]}),
            )
            .route_json(CHAINS_URL, json!([{"name": "Ethereum"}, {"name": "Polygon"}]))
    }

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn test_all_bridges_returns_bridges_field() {
        let mock = Arc::new(mock());
        let value = client_with(&mock).all_bridges(false).await.unwrap();
        assert_eq!(value[0]["name"], "Bridge 1");
        assert_eq!(mock.last_query(), query(&[("includeChains", "false")]));
    }

    #[tokio::test]
    async fn test_bridge_by_name_or_id() {
        let mock = Arc::new(mock().route_json("https://bridges.llama.fi/bridge/1", json!({"id": 1})));
        let client = client_with(&mock);
        assert_eq!(client.bridge("Bridge 1").await.unwrap(), json!({"id": 1}));
        assert_eq!(client.bridge(1u64).await.unwrap(), json!({"id": 1}));
        assert!(client.bridge("Invalid Bridge").await.unwrap_err().is_resolution());
    }

    #[tokio::test]
    async fn test_bridge_volume_drops_unknown_bridge() {
        let url = "https://bridges.llama.fi/bridgevolume/ethereum";
        let mock = Arc::new(mock().route_json(url, json!([])));
        let client = client_with(&mock);

        client.bridge_volume("ethereum", Some("Bridge 2".into())).await.unwrap();
        assert_eq!(mock.last_query(), query(&[("id", "2")]));

        client.bridge_volume("Ethereum", Some("Nope".into())).await.unwrap();
        assert!(mock.last_query().is_empty());

        client.bridge_volume("ethereum", None).await.unwrap();
        assert!(mock.last_query().is_empty());
        assert_eq!(mock.calls_to(url), 3);
    }

    #[tokio::test]
    async fn test_bridge_volume_requires_known_chain() {
        let mock = Arc::new(mock());
        let err = client_with(&mock)
            .bridge_volume("solana", Some(1u64.into()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid chain: solana"));
    }

    #[tokio::test]
    async fn test_bridge_day_stats_path() {
        let url = "https://bridges.llama.fi/bridgedaystats/1667304000/polygon";
        let mock = Arc::new(mock().route_json(url, json!([{"date": 1667304000}])));
        let client = client_with(&mock);
        client
            .bridge_day_stats(1667304000, "polygon", Some(Identifier::from("1")))
            .await
            .unwrap();
        assert_eq!(mock.calls_to(url), 1);
        assert_eq!(mock.last_query(), query(&[("id", "1")]));
    }

    #[tokio::test]
    async fn test_bridge_transactions_defaults() {
        let url = "https://bridges.llama.fi/transactions/2";
        let mock = Arc::new(mock().route_json(url, json!([])));
        client_with(&mock)
            .bridge_transactions("Bridge 2", BridgeTransactionsQuery::default())
            .await
            .unwrap();
        assert_eq!(mock.last_query(), query(&[("limit", "200")]));
    }

    #[tokio::test]
    async fn test_bridge_transactions_filters() {
        let url = "https://bridges.llama.fi/transactions/1";
        let mock = Arc::new(mock().route_json(url, json!([])));
        let client = client_with(&mock);
        let filters = BridgeTransactionsQuery {
            start_timestamp: Some(1667260800),
            end_timestamp: Some(1667347200),
            source_chain: Some("Polygon".to_string()),
            address: Some("ethereum:0xabc".to_string()),
            limit: 10,
        };
        client.bridge_transactions(1u64, filters).await.unwrap();
        assert_eq!(
            mock.last_query(),
            query(&[
                ("starttimestamp", "1667260800"),
                ("endtimestamp", "1667347200"),
                ("sourcechain", "polygon"),
                ("address", "ethereum:0xabc"),
                ("limit", "10"),
            ])
        );
    }

    #[tokio::test]
    async fn test_bridge_transactions_rejects_unknown_source_chain() {
        let mock = Arc::new(mock());
        let filters = BridgeTransactionsQuery {
            source_chain: Some("solana".to_string()),
            ..Default::default()
        };
        let err = client_with(&mock).bridge_transactions(1u64, filters).await.unwrap_err();
        assert!(err.is_resolution());
        assert_eq!(mock.calls_to("https://bridges.llama.fi/transactions/1"), 0);
    }
}

use serde_json::Value;

use crate::client::DefiLlamaClient;
use crate::error::Result;
use crate::request::{ApiRequest, ApiSection};

impl DefiLlamaClient {
    /// All protocols with their current TVL.
    pub async fn all_protocols(&self) -> Result<Value> {
        self.execute(ApiRequest::new(ApiSection::Tvl, "protocols")).await
    }

    /// Historical TVL of a protocol with token and chain breakdowns.
    pub async fn protocol(&self, protocol: &str) -> Result<Value> {
        let slug = self.resolve_protocol(protocol).await?;
        self.execute(ApiRequest::new(ApiSection::Tvl, "protocol").segment(slug))
            .await
    }

    /// Historical TVL of DeFi across all chains.
    pub async fn historical_chain_tvl(&self) -> Result<Value> {
        self.execute(ApiRequest::new(ApiSection::Tvl, "v2").segment("historicalChainTvl"))
            .await
    }

    pub async fn historical_chain_tvl_for(&self, chain: &str) -> Result<Value> {
        let chain = self.resolve_chain(chain).await?;
        self.execute(
            ApiRequest::new(ApiSection::Tvl, "v2")
                .segment("historicalChainTvl")
                .segment(chain),
        )
        .await
    }

    /// Current TVL of a protocol, as a bare number.
    pub async fn protocol_current_tvl(&self, protocol: &str) -> Result<Value> {
        let slug = self.resolve_protocol(protocol).await?;
        self.execute(ApiRequest::new(ApiSection::Tvl, "tvl").segment(slug)).await
    }

    pub async fn chains_current_tvl(&self) -> Result<Value> {
        self.execute(ApiRequest::new(ApiSection::Tvl, "v2").segment("chains"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{client_with, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    const PROTOCOLS_URL: &str = "https://api.llama.fi/protocols";
    const CHAINS_URL: &str = "https://api.llama.fi/v2/chains";

    #[tokio::test]
    async fn test_all_protocols() {
        let mock = Arc::new(MockTransport::new().route_json(PROTOCOLS_URL, json!([{"slug": "aave", "tvl": 1}])));
        let value = client_with(&mock).all_protocols().await.unwrap();
        assert_eq!(value, json!([{"slug": "aave", "tvl": 1}]));
    }

    #[tokio::test]
    async fn test_protocol_is_validated() {
        let mock = Arc::new(
            MockTransport::new()
                .route_json(PROTOCOLS_URL, json!([{"slug": "aave"}, {"slug": "uniswap"}]))
                .route_json("https://api.llama.fi/protocol/aave", json!({"name": "AAVE"})),
        );
        let client = client_with(&mock);
        assert_eq!(client.protocol("AAVE").await.unwrap(), json!({"name": "AAVE"}));

        let err = client.protocol("compound").await.unwrap_err();
        assert!(err.to_string().contains("Invalid protocol: compound"));
    }

    #[tokio::test]
    async fn test_protocol_current_tvl() {
        let mock = Arc::new(
            MockTransport::new()
                .route_json(PROTOCOLS_URL, json!([{"slug": "aave"}]))
                .route("https://api.llama.fi/tvl/aave", 200, "12345.5"),
        );
        let value = client_with(&mock).protocol_current_tvl("aave").await.unwrap();
        assert_eq!(value, json!(12345.5));
    }

    #[tokio::test]
    async fn test_historical_chain_tvl() {
        let series = json!([{"date": 1530230400, "tvl": 20541.9}]);
        let mock = Arc::new(
            MockTransport::new()
                .route_json("https://api.llama.fi/v2/historicalChainTvl", series.clone())
                .route_json(CHAINS_URL, json!([{"name": "Ethereum"}]))
                .route_json("https://api.llama.fi/v2/historicalChainTvl/ethereum", series.clone()),
        );
        let client = client_with(&mock);
        assert_eq!(client.historical_chain_tvl().await.unwrap(), series);
        assert_eq!(client.historical_chain_tvl_for("Ethereum").await.unwrap(), series);
        assert!(client.historical_chain_tvl_for("solana").await.unwrap_err().is_resolution());
    }

    #[tokio::test]
    async fn test_chains_current_tvl_shares_listing_endpoint() {
        let mock = Arc::new(MockTransport::new().route_json(CHAINS_URL, json!([{"name": "Ethereum", "tvl": 10}])));
        let client = client_with(&mock);
        assert_eq!(client.chains_current_tvl().await.unwrap()[0]["tvl"], 10);
        assert_eq!(client.chains().await.unwrap(), ["ethereum"]);
    }
}

use serde_json::Value;

use crate::client::DefiLlamaClient;
use crate::error::Result;
use crate::request::{ApiRequest, ApiSection};
use crate::resolver::Identifier;

impl DefiLlamaClient {
    /// Every yield pool with its current APY (`data`).
    pub async fn yield_pools(&self) -> Result<Value> {
        self.execute_field(ApiRequest::new(ApiSection::Yields, "pools"), "data")
            .await
    }

    /// Historical APY and TVL of a pool, by pool id or symbol.
    pub async fn pool_historical_apy_and_tvl(&self, pool: impl Into<Identifier>) -> Result<Value> {
        let pool = self.resolve_pool(pool).await?;
        self.execute(ApiRequest::new(ApiSection::Yields, "chart").segment(pool))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{client_with, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    const POOLS_URL: &str = "https://yields.llama.fi/pools";
    const POOL_ID: &str = "747c1d2a-c668-4682-b9f9-296708a3dd90";

    #[tokio::test]
    async fn test_yield_pools_returns_data() {
        let mock = Arc::new(MockTransport::new().route_json(
            POOLS_URL,
            json!({"status": "success", "data": [{"pool": POOL_ID, "symbol": "STETH"}]}),
        ));
        let value = client_with(&mock).yield_pools().await.unwrap();
        assert_eq!(value, json!([{"pool": POOL_ID, "symbol": "STETH"}]));
    }

    #[tokio::test]
    async fn test_pool_chart_by_id_or_symbol() {
        let chart_url = format!("https://yields.llama.fi/chart/{}", POOL_ID);
        let mock = Arc::new(
            MockTransport::new()
                .route_json(POOLS_URL, json!({"data": [{"pool": POOL_ID, "symbol": "STETH"}]}))
                .route_json(&chart_url, json!({"status": "success", "data": []})),
        );
        let client = client_with(&mock);
        client.pool_historical_apy_and_tvl(POOL_ID).await.unwrap();
        client.pool_historical_apy_and_tvl("STETH").await.unwrap();
        assert_eq!(mock.calls_to(&chart_url), 2);
        assert_eq!(mock.calls_to(POOLS_URL), 1);

        let err = client.pool_historical_apy_and_tvl("nope").await.unwrap_err();
        assert!(err.to_string().contains("Invalid pool: nope"));
    }
}

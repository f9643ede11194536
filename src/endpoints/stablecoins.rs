use serde_json::Value;

use crate::client::DefiLlamaClient;
use crate::error::Result;
use crate::request::{ApiRequest, ApiSection};
use crate::resolver::Identifier;

impl DefiLlamaClient {
    /// Stablecoins with their circulating amounts (`peggedAssets`).
    pub async fn stablecoins_circulating(&self, include_prices: bool) -> Result<Value> {
        let request = ApiRequest::new(ApiSection::Stablecoins, "stablecoins").param("includePrices", include_prices);
        self.execute_field(request, "peggedAssets").await
    }

    /// Current stablecoin market cap on every chain.
    pub async fn stablecoin_chains_market_cap(&self) -> Result<Value> {
        self.execute(ApiRequest::new(ApiSection::Stablecoins, "stablecoinchains"))
            .await
    }

    pub async fn stablecoin_historical_market_cap(&self, stablecoin: impl Into<Identifier>) -> Result<Value> {
        let id = self.resolve_stablecoin(stablecoin).await?;
        self.execute(
            ApiRequest::new(ApiSection::Stablecoins, "stablecoincharts")
                .segment("all")
                .param("stablecoin", id),
        )
        .await
    }

    pub async fn stablecoin_historical_market_cap_in_chain(
        &self,
        chain: &str,
        stablecoin: impl Into<Identifier>,
    ) -> Result<Value> {
        let chain = self.resolve_chain(chain).await?;
        let id = self.resolve_stablecoin(stablecoin).await?;
        self.execute(
            ApiRequest::new(ApiSection::Stablecoins, "stablecoincharts")
                .segment(chain)
                .param("stablecoin", id),
        )
        .await
    }

    pub async fn stablecoin_market_cap_and_chain_distribution(&self, stablecoin: impl Into<Identifier>) -> Result<Value> {
        let id = self.resolve_stablecoin(stablecoin).await?;
        self.execute(ApiRequest::new(ApiSection::Stablecoins, "stablecoin").segment(id))
            .await
    }

    pub async fn stablecoin_historical_prices(&self) -> Result<Value> {
        self.execute(ApiRequest::new(ApiSection::Stablecoins, "stablecoinprices"))
            .await
    }
}

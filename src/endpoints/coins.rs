use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::cache::load_from_file;
use crate::client::{decode, DefiLlamaClient};
use crate::config::COINGECKO_COINS_LIST_URL;
use crate::error::{LlamaError, Result};
use crate::models::listing::{CoinGeckoEntry, CoinIdsFile};
use crate::models::Coins;
use crate::request::{ApiRequest, ApiSection};
use crate::utils::{previous_timestamp, to_timestamp, DateInput};

const BUNDLED_COIN_IDS: &str = include_str!("../../resources/coingecko_ids.json");

/// Default look-back of [`DefiLlamaClient::price_chart`] when no start is given.
pub const DEFAULT_CHART_DAYS: i64 = 90;

/// Where [`DefiLlamaClient::coingecko_coin_ids`] reads ids from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoinIdSource {
    /// The list shipped with the crate; no network access.
    #[default]
    Bundled,
    /// A live fetch of CoinGecko's coin list.
    CoinGeckoApi,
}

/// Window of a [`DefiLlamaClient::price_chart`] request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartQuery {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub span: u32,
    pub period: String,
    pub search_width: Option<String>,
}

impl Default for ChartQuery {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            span: 10,
            period: "24h".to_string(),
            search_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PercentageQuery {
    pub timestamp: Option<i64>,
    pub look_forward: bool,
    pub period: String,
}

impl Default for PercentageQuery {
    fn default() -> Self {
        Self {
            timestamp: None,
            look_forward: false,
            period: "24h".to_string(),
        }
    }
}

impl DefiLlamaClient {
    /// Current prices. Coins are `chain:address`, or `coingecko:{id}`.
    pub async fn current_prices(&self, coins: impl Into<Coins>, search_width: Option<&str>) -> Result<Value> {
        let coins: Coins = coins.into();
        self.execute(
            ApiRequest::new(ApiSection::Coins, "prices")
                .segment("current")
                .segment(coins)
                .opt_param("searchWidth", search_width),
        )
        .await
    }

    /// Prices at `timestamp`.
    pub async fn historical_prices(
        &self,
        coins: impl Into<Coins>,
        timestamp: impl Into<DateInput>,
        search_width: Option<&str>,
    ) -> Result<Value> {
        let coins: Coins = coins.into();
        let timestamp = to_timestamp(timestamp)?;
        self.execute(
            ApiRequest::new(ApiSection::Coins, "prices")
                .segment("historical")
                .segment(timestamp)
                .segment(coins)
                .opt_param("searchWidth", search_width),
        )
        .await
    }

    /// Price candles at regular intervals.
    pub async fn price_chart(&self, coins: impl Into<Coins>, query: ChartQuery) -> Result<Value> {
        let coins: Coins = coins.into();
        let start = query
            .start
            .unwrap_or_else(|| previous_timestamp(DEFAULT_CHART_DAYS));
        self.execute(
            ApiRequest::new(ApiSection::Coins, "chart")
                .segment(coins)
                .param("start", start)
                .opt_param("end", query.end)
                .param("span", query.span)
                .param("period", query.period)
                .opt_param("searchWidth", query.search_width),
        )
        .await
    }

    pub async fn percentage_change(&self, coins: impl Into<Coins>, query: PercentageQuery) -> Result<Value> {
        let coins: Coins = coins.into();
        self.execute(
            ApiRequest::new(ApiSection::Coins, "percentage")
                .segment(coins)
                .opt_param("timestamp", query.timestamp)
                .param("lookForward", query.look_forward)
                .param("period", query.period),
        )
        .await
    }

    /// Earliest recorded price of each coin.
    pub async fn first_prices(&self, coins: impl Into<Coins>) -> Result<Value> {
        let coins: Coins = coins.into();
        self.execute(
            ApiRequest::new(ApiSection::Coins, "prices")
                .segment("first")
                .segment(coins),
        )
        .await
    }

    /// Block closest to `timestamp` on `chain`.
    pub async fn closest_block(&self, chain: &str, timestamp: impl Into<DateInput>) -> Result<Value> {
        let timestamp = to_timestamp(timestamp)?;
        self.execute(
            ApiRequest::new(ApiSection::Coins, "block")
                .segment(chain)
                .segment(timestamp),
        )
        .await
    }

    /// CoinGecko ids usable as `coingecko:{id}` coins, after skipping `skip`
    /// and keeping at most `limit`.
    pub async fn coingecko_coin_ids(&self, skip: usize, limit: Option<usize>, source: CoinIdSource) -> Result<Vec<String>> {
        let ids = match source {
            CoinIdSource::CoinGeckoApi => {
                info!("loading coingecko ids from the coingecko api");
                let value = self.session().get_json(COINGECKO_COINS_LIST_URL, &[]).await?;
                let entries: Vec<CoinGeckoEntry> = decode(value, "coingecko coins list")?;
                entries.into_iter().map(|entry| entry.id).collect()
            }
            CoinIdSource::Bundled => {
                info!("loading coingecko ids from the bundled list");
                bundled_coin_ids()?
            }
        };
        Ok(ids
            .into_iter()
            .skip(skip)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }
}

fn bundled_coin_ids() -> Result<Vec<String>> {
    let file: CoinIdsFile = serde_json::from_str(BUNDLED_COIN_IDS).map_err(|source| LlamaError::Payload {
        context: "bundled coin ids",
        source,
    })?;
    Ok(file.coins)
}

/// Read a `{"coins": [...]}` id file.
pub fn load_coin_ids_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let file: CoinIdsFile = load_from_file(path)?;
    Ok(file.coins)
}

use serde::{Deserialize, Deserializer};

/// Upstream ids arrive as numbers on some endpoints and numeric strings on others.
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(u64),
        Str(String),
    }
    match Id::deserialize(deserializer)? {
        Id::Num(n) => Ok(n),
        Id::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric id: {}", s))),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChainEntry {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProtocolEntry {
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BridgesResponse {
    pub bridges: Vec<BridgeEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BridgeEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StablecoinsResponse {
    #[serde(rename = "peggedAssets")]
    pub pegged_assets: Vec<StablecoinEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StablecoinEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PoolsResponse {
    pub data: Vec<PoolEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PoolEntry {
    pub pool: String,
    pub symbol: String,
}

/// Shared shape of the dexs/options/fees overview responses.
#[derive(Debug, Deserialize)]
pub(crate) struct OverviewResponse {
    #[serde(default)]
    pub protocols: Vec<NamedEntry>,
    #[serde(rename = "allChains", default)]
    pub all_chains: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedEntry {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoinGeckoEntry {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoinIdsFile {
    pub coins: Vec<String>,
}

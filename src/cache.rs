//! Reference listings, fetched on first use and kept for the life of the client.
//!
//! Nothing here is ever refreshed: an id listed upstream after a listing was
//! loaded stays unresolvable until a new [`DefiLlamaClient`] is created.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::info;

use crate::client::DefiLlamaClient;
use crate::error::{LlamaError, Result};
use crate::models::listing::{
    BridgesResponse, ChainEntry, OverviewResponse, PoolsResponse, ProtocolEntry, StablecoinsResponse,
};
use crate::models::{DexDataType, FeesDataType, OptionsDataType, OverviewOptions};
use crate::request::{ApiRequest, ApiSection};
use crate::resolver::NamedListing;
use crate::utils::slugify;

/// Entity category of a reference listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Chain,
    Protocol,
    Bridge,
    Stablecoin,
    Pool,
    DexChain,
    DexProtocol,
    OptionsChain,
    OptionsProtocol,
    FeesChain,
    FeesProtocol,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Chain => "chain",
            Category::Protocol => "protocol",
            Category::Bridge => "bridge",
            Category::Stablecoin => "stablecoin",
            Category::Pool => "pool",
            Category::DexChain => "dex chain",
            Category::DexProtocol => "dex protocol",
            Category::OptionsChain => "options chain",
            Category::OptionsProtocol => "options protocol",
            Category::FeesChain => "fees chain",
            Category::FeesProtocol => "fees protocol",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of one loaded listing.
#[derive(Debug, Clone, Copy)]
pub enum Listing<'a> {
    Slugs(&'a [String]),
    Ids(&'a NamedListing<u64>),
    Pools(&'a NamedListing<String>),
}

impl Listing<'_> {
    pub fn len(&self) -> usize {
        match self {
            Listing::Slugs(s) => s.len(),
            Listing::Ids(m) => m.len(),
            Listing::Pools(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
pub(crate) struct ReferenceCache {
    chains: OnceCell<Vec<String>>,
    protocols: OnceCell<Vec<String>>,
    bridges: OnceCell<NamedListing<u64>>,
    stablecoins: OnceCell<NamedListing<u64>>,
    pools: OnceCell<NamedListing<String>>,
    dex_chains: OnceCell<Vec<String>>,
    dex_protocols: OnceCell<Vec<String>>,
    options_chains: OnceCell<Vec<String>>,
    options_protocols: OnceCell<Vec<String>>,
    fees_chains: OnceCell<Vec<String>>,
    fees_protocols: OnceCell<Vec<String>>,
}

fn unique(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

fn loaded<T>(category: Category, count: usize, listing: T) -> Result<T> {
    info!(category = category.label(), count, "reference listing loaded");
    Ok(listing)
}

impl DefiLlamaClient {
    /// Lowercased chain names from `v2/chains`.
    pub async fn chains(&self) -> Result<&[String]> {
        let chains = self
            .cache()
            .chains
            .get_or_try_init(|| async {
                let entries: Vec<ChainEntry> = self
                    .fetch_as(ApiRequest::new(ApiSection::Tvl, "v2").segment("chains"), "chains")
                    .await?;
                let chains = unique(entries.into_iter().map(|c| c.name.to_lowercase()));
                loaded(Category::Chain, chains.len(), chains)
            })
            .await?;
        Ok(chains)
    }

    /// Protocol slugs from `protocols`.
    pub async fn protocols(&self) -> Result<&[String]> {
        let protocols = self
            .cache()
            .protocols
            .get_or_try_init(|| async {
                let entries: Vec<ProtocolEntry> = self
                    .fetch_as(ApiRequest::new(ApiSection::Tvl, "protocols"), "protocols")
                    .await?;
                let protocols = unique(entries.into_iter().map(|p| p.slug));
                loaded(Category::Protocol, protocols.len(), protocols)
            })
            .await?;
        Ok(protocols)
    }

    /// Bridge id → display name.
    pub async fn bridges(&self) -> Result<&NamedListing<u64>> {
        self.cache()
            .bridges
            .get_or_try_init(|| async {
                let response: BridgesResponse = self
                    .fetch_as(ApiRequest::new(ApiSection::Bridges, "bridges"), "bridges")
                    .await?;
                let bridges: NamedListing<u64> = response.bridges.into_iter().map(|b| (b.id, b.name)).collect();
                loaded(Category::Bridge, bridges.len(), bridges)
            })
            .await
    }

    /// Stablecoin id → symbol.
    pub async fn stablecoins(&self) -> Result<&NamedListing<u64>> {
        self.cache()
            .stablecoins
            .get_or_try_init(|| async {
                let response: StablecoinsResponse = self
                    .fetch_as(ApiRequest::new(ApiSection::Stablecoins, "stablecoins"), "stablecoins")
                    .await?;
                let stablecoins: NamedListing<u64> = response
                    .pegged_assets
                    .into_iter()
                    .map(|s| (s.id, s.symbol))
                    .collect();
                loaded(Category::Stablecoin, stablecoins.len(), stablecoins)
            })
            .await
    }

    /// Yield pool id → symbol.
    pub async fn pools(&self) -> Result<&NamedListing<String>> {
        self.cache()
            .pools
            .get_or_try_init(|| async {
                let response: PoolsResponse = self
                    .fetch_as(ApiRequest::new(ApiSection::Yields, "pools"), "pools")
                    .await?;
                let pools: NamedListing<String> = response.data.into_iter().map(|p| (p.pool, p.symbol)).collect();
                loaded(Category::Pool, pools.len(), pools)
            })
            .await
    }

    pub async fn dex_chains(&self) -> Result<&[String]> {
        let chains = self
            .cache()
            .dex_chains
            .get_or_try_init(|| async {
                let overview = self.dex_overview_listing().await?;
                let chains = lowercase_chains(overview);
                loaded(Category::DexChain, chains.len(), chains)
            })
            .await?;
        Ok(chains)
    }

    pub async fn dex_protocols(&self) -> Result<&[String]> {
        let protocols = self
            .cache()
            .dex_protocols
            .get_or_try_init(|| async {
                let overview = self.dex_overview_listing().await?;
                let protocols = protocol_slugs(overview);
                loaded(Category::DexProtocol, protocols.len(), protocols)
            })
            .await?;
        Ok(protocols)
    }

    pub async fn options_chains(&self) -> Result<&[String]> {
        let chains = self
            .cache()
            .options_chains
            .get_or_try_init(|| async {
                let overview = self.options_overview_listing().await?;
                let chains = lowercase_chains(overview);
                loaded(Category::OptionsChain, chains.len(), chains)
            })
            .await?;
        Ok(chains)
    }

    pub async fn options_protocols(&self) -> Result<&[String]> {
        let protocols = self
            .cache()
            .options_protocols
            .get_or_try_init(|| async {
                let overview = self.options_overview_listing().await?;
                let protocols = protocol_slugs(overview);
                loaded(Category::OptionsProtocol, protocols.len(), protocols)
            })
            .await?;
        Ok(protocols)
    }

    pub async fn fees_chains(&self) -> Result<&[String]> {
        let chains = self
            .cache()
            .fees_chains
            .get_or_try_init(|| async {
                let overview = self.fees_overview_listing().await?;
                let chains = lowercase_chains(overview);
                loaded(Category::FeesChain, chains.len(), chains)
            })
            .await?;
        Ok(chains)
    }

    pub async fn fees_protocols(&self) -> Result<&[String]> {
        let protocols = self
            .cache()
            .fees_protocols
            .get_or_try_init(|| async {
                let overview = self.fees_overview_listing().await?;
                let protocols = protocol_slugs(overview);
                loaded(Category::FeesProtocol, protocols.len(), protocols)
            })
            .await?;
        Ok(protocols)
    }

    /// Any listing by category, loading it if needed.
    pub async fn listing(&self, category: Category) -> Result<Listing<'_>> {
        Ok(match category {
            Category::Chain => Listing::Slugs(self.chains().await?),
            Category::Protocol => Listing::Slugs(self.protocols().await?),
            Category::Bridge => Listing::Ids(self.bridges().await?),
            Category::Stablecoin => Listing::Ids(self.stablecoins().await?),
            Category::Pool => Listing::Pools(self.pools().await?),
            Category::DexChain => Listing::Slugs(self.dex_chains().await?),
            Category::DexProtocol => Listing::Slugs(self.dex_protocols().await?),
            Category::OptionsChain => Listing::Slugs(self.options_chains().await?),
            Category::OptionsProtocol => Listing::Slugs(self.options_protocols().await?),
            Category::FeesChain => Listing::Slugs(self.fees_chains().await?),
            Category::FeesProtocol => Listing::Slugs(self.fees_protocols().await?),
        })
    }

    async fn dex_overview_listing(&self) -> Result<OverviewResponse> {
        let overview = self
            .dexes_volume_overview(DexDataType::default(), OverviewOptions::default())
            .await?;
        crate::client::decode(overview, "dexs overview")
    }

    async fn options_overview_listing(&self) -> Result<OverviewResponse> {
        let overview = self
            .options_overview(OptionsDataType::default(), OverviewOptions::default())
            .await?;
        crate::client::decode(overview, "options overview")
    }

    async fn fees_overview_listing(&self) -> Result<OverviewResponse> {
        let overview = self
            .fees_overview(FeesDataType::default(), OverviewOptions::default())
            .await?;
        crate::client::decode(overview, "fees overview")
    }
}

fn lowercase_chains(overview: OverviewResponse) -> Vec<String> {
    overview.all_chains.into_iter().map(|c| c.to_lowercase()).collect()
}

fn protocol_slugs(overview: OverviewResponse) -> Vec<String> {
    overview.protocols.into_iter().map(|p| slugify(&p.name)).collect()
}

/// Load a JSON file into `T`.
pub fn load_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LlamaError::Resource {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| LlamaError::Resource {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

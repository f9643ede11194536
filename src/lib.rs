//! # defillama-rs
//!
//! An async Rust client for the public DefiLlama API.
//! One method per API capability; identifiers are checked against live reference
//! listings before any request goes out.
//!
//! ## Sections
//!
//! | Section | Host | Reference listings |
//! |---------|------|--------------------|
//! | TVL | api.llama.fi | chains, protocols |
//! | Coins | coins.llama.fi | - |
//! | Stablecoins | stablecoins.llama.fi | stablecoins (id → symbol) |
//! | Yields | yields.llama.fi | pools (id → symbol) |
//! | Bridges | bridges.llama.fi | bridges (id → name) |
//! | Volumes | api.llama.fi | dex/options chains and protocols |
//! | Fees | api.llama.fi | fees chains and protocols |
//!
//! Listings are fetched on first use and kept for the lifetime of the client.
//! They are never refreshed: create a new client to pick up newly listed entities.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use defillama::{DefiLlamaClient, Coin, DexDataType, OverviewOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DefiLlamaClient::new()?;
//!
//!     // Bridges resolve by name or id
//!     let stargate = client.bridge("Stargate").await?;
//!     println!("{}", stargate["displayName"]);
//!
//!     // Prices take joined strings, pairs or lists of either
//!     let prices = client
//!         .current_prices(vec![Coin::coingecko("ethereum"), Coin::new("bsc", "0x762539b45a1dcce3d36d080f74d1aed37844b878")], None)
//!         .await?;
//!     println!("{}", prices);
//!
//!     let volumes = client
//!         .dexes_volume_overview_for_chain("ethereum", DexDataType::DailyVolume, OverviewOptions::default())
//!         .await?;
//!     println!("{}", volumes["total24h"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Reference listings
//! cargo run --release -- chains
//! cargo run --release -- bridges
//!
//! # Protocol TVL history
//! cargo run --release -- protocol aave
//!
//! # Current prices, with an extra header
//! cargo run --release -- --header "User-Agent:my-app/1.0" prices coingecko:ethereum,coingecko:uniswap
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod request;
pub mod resolver;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod testing;

pub use cache::{Category, Listing};
pub use client::DefiLlamaClient;
pub use endpoints::{load_coin_ids_from_file, BridgeTransactionsQuery, ChartQuery, CoinIdSource, PercentageQuery};
pub use error::{LlamaError, Result};
pub use models::{prepare_coins, Coin, CoinRef, Coins, DexDataType, FeesDataType, OptionsDataType, OverviewOptions};
pub use request::{build_url, ApiRequest, ApiSection};
pub use resolver::{Identifier, NamedListing};
pub use transport::{HttpTransport, RawResponse};

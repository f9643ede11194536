//! One `impl DefiLlamaClient` block per API section.
//!
//! Every method resolves its identifiers first, so an unknown chain, protocol,
//! bridge, stablecoin or pool fails before the target request is sent.

pub mod bridges;
pub mod coins;
pub mod fees;
pub mod stablecoins;
pub mod tvl;
pub mod volumes;
pub mod yields;

pub use bridges::BridgeTransactionsQuery;
pub use coins::{load_coin_ids_from_file, ChartQuery, CoinIdSource, PercentageQuery};

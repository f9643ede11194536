pub mod coin;
pub mod data_type;
pub(crate) mod listing;

pub use coin::{prepare_coins, Coin, CoinRef, Coins};
pub use data_type::{DexDataType, FeesDataType, OptionsDataType, OverviewOptions};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A token on a chain: a contract address, or a CoinGecko id when `chain` is `coingecko`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    pub chain: String,
    pub address: String,
}

impl Coin {
    pub fn new(chain: &str, address: &str) -> Self {
        Self {
            chain: chain.to_string(),
            address: address.to_string(),
        }
    }

    pub fn coingecko(id: &str) -> Self {
        Self::new("coingecko", id)
    }

    pub fn identifier(&self, delimiter: &str) -> String {
        format!("{}{}{}", self.chain, delimiter, self.address)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.address)
    }
}

impl FromStr for Coin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((chain, address)) if !chain.is_empty() && !address.is_empty() => {
                Ok(Coin::new(chain, address))
            }
            _ => Err(format!("expected chain:address, got {}", s)),
        }
    }
}

/// One coin, given either already joined (`chain:address`) or as a pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CoinRef {
    Joined(String),
    Pair(Coin),
}

impl CoinRef {
    pub fn token(&self) -> String {
        match self {
            CoinRef::Joined(s) => s.clone(),
            CoinRef::Pair(coin) => coin.to_string(),
        }
    }
}

impl From<&str> for CoinRef {
    fn from(s: &str) -> Self {
        CoinRef::Joined(s.to_string())
    }
}

impl From<String> for CoinRef {
    fn from(s: String) -> Self {
        CoinRef::Joined(s)
    }
}

impl From<Coin> for CoinRef {
    fn from(coin: Coin) -> Self {
        CoinRef::Pair(coin)
    }
}

/// Input shape of the pricing endpoints: a single coin or a list.
// `Many` goes first: a two element array would otherwise decode as a `Coin` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Coins {
    Many(Vec<CoinRef>),
    One(CoinRef),
}

impl Coins {
    /// Comma-joined `chain:address` tokens in input order. Duplicates are kept.
    pub fn to_query(&self) -> String {
        match self {
            Coins::One(coin) => coin.token(),
            Coins::Many(coins) => coins.iter().map(CoinRef::token).collect::<Vec<_>>().join(","),
        }
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

impl From<&str> for Coins {
    fn from(s: &str) -> Self {
        Coins::One(s.into())
    }
}

impl From<String> for Coins {
    fn from(s: String) -> Self {
        Coins::One(s.into())
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        Coins::One(coin.into())
    }
}

impl From<CoinRef> for Coins {
    fn from(coin: CoinRef) -> Self {
        Coins::One(coin)
    }
}

impl<T: Into<CoinRef>> From<Vec<T>> for Coins {
    fn from(coins: Vec<T>) -> Self {
        Coins::Many(coins.into_iter().map(Into::into).collect())
    }
}

pub fn prepare_coins(coins: &Coins) -> String {
    coins.to_query()
}

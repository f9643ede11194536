use std::time::Duration;

pub const TVL_URL: &str = "https://api.llama.fi";
pub const COINS_URL: &str = "https://coins.llama.fi";
pub const STABLECOINS_URL: &str = "https://stablecoins.llama.fi";
pub const YIELDS_URL: &str = "https://yields.llama.fi";
pub const BRIDGES_URL: &str = "https://bridges.llama.fi";

pub const COINGECKO_COINS_LIST_URL: &str = "https://api.coingecko.com/api/v3/coins/list";

pub const DEFAULT_RETRIES: u32 = 5;
pub const BACKOFF_FACTOR: f64 = 0.1;
pub const RETRYABLE_STATUSES: [u16; 5] = [500, 502, 503, 504, 406];
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const BACKOFF_MAX_SECS: f64 = 120.0;

pub fn default_user_agent() -> String {
    format!("defillama-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Retry budget and backoff applied to every outbound GET.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub(crate) retries: u32,
    pub(crate) backoff_factor: f64,
    pub(crate) statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            backoff_factor: BACKOFF_FACTOR,
            statuses: RETRYABLE_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    pub fn is_retryable(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }

    /// Delay before retry number `attempt` (1-based). The first retry is immediate.
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt <= 1 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let secs = self.backoff_factor * f64::from(1u32 << (attempt - 1).min(16));
        Duration::from_secs_f64(secs.min(BACKOFF_MAX_SECS))
    }

    #[cfg(test)]
    pub(crate) fn immediate(retries: u32) -> Self {
        Self {
            retries,
            backoff_factor: 0.0,
            ..Self::default()
        }
    }
}

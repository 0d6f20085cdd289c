mod cache;
mod http;

pub use cache::TtlCache;
pub use http::HttpGateway;

use async_trait::async_trait;

use crate::types::{ContractRecord, DailyQuote};

/// Uniform interface over the external market-data lookups. Every method
/// treats provider failure (timeout, rate limit, non-200, malformed payload)
/// as an absence of data; callers never see transport errors.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Previous trading session's close and share volume.
    async fn daily_quote(&self, ticker: &str) -> Option<DailyQuote>;

    /// IV rank: percentile (0-100) of current implied volatility against its
    /// trailing one-year range.
    async fn iv_rank(&self, ticker: &str) -> Option<f64>;

    /// Snapshot of the ticker's option chain. Empty when unavailable.
    async fn options_snapshot(&self, ticker: &str) -> Vec<ContractRecord>;
}

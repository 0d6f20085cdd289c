use crate::error::{AppError, Result};

pub const POLYGON_API_URL: &str = "https://api.polygon.io";
pub const ORATS_API_URL: &str = "https://api.orats.io";

/// Max contracts requested per options snapshot. Covers the liquid strikes of
/// any large-cap chain without paginating.
pub const SNAPSHOT_CONTRACT_LIMIT: usize = 250;

/// Per-request timeouts (seconds). The snapshot payload is an order of
/// magnitude larger than the quote and IV lookups and gets a longer budget.
pub const SNAPSHOT_TIMEOUT_SECS: u64 = 8;
pub const QUOTE_TIMEOUT_SECS: u64 = 5;
pub const IV_RANK_TIMEOUT_SECS: u64 = 5;

/// Cache freshness windows (seconds) per fetch kind. Snapshots move fastest,
/// previous-day quotes only change at the session roll, IV rank is daily.
pub const SNAPSHOT_CACHE_TTL_SECS: u64 = 900;
pub const QUOTE_CACHE_TTL_SECS: u64 = 1800;
pub const IV_RANK_CACHE_TTL_SECS: u64 = 3600;

/// Quick scans cover only the first QUICK_SCAN_LIMIT universe entries.
pub const QUICK_SCAN_LIMIT: usize = 100;

/// Default bound on concurrent per-ticker pipelines (SCAN_CONCURRENCY).
pub const DEFAULT_SCAN_CONCURRENCY: usize = 8;

/// Calls expiring within this many days count as near-term.
pub const NEAR_TERM_WINDOW_DAYS: i64 = 30;

/// Put/call ratio reported when call volume is zero ("all puts").
pub const PC_RATIO_ALL_PUTS: f64 = 999.0;

/// One listed contract covers 100 shares.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Baseline option-volume proxy: previous-session share volume scaled by a
/// per-tier divisor, floored at a per-tier minimum so thin sessions never
/// produce a zero baseline. The put baseline is PUT_FACTOR of the call
/// baseline, truncated.
pub mod baseline {
    pub const MEGA_DIVISOR: u64 = 200;
    pub const MEGA_FLOOR: u64 = 5_000;
    pub const LARGE_DIVISOR: u64 = 500;
    pub const LARGE_FLOOR: u64 = 1_000;
    pub const MID_DIVISOR: u64 = 1_000;
    pub const MID_FLOOR: u64 = 300;
    pub const PUT_FACTOR: f64 = 0.7;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub polygon_api_url: String,
    pub polygon_api_key: String,
    pub orats_api_url: String,
    pub orats_api_token: String,
    /// Max ticker pipelines in flight at once (SCAN_CONCURRENCY)
    pub scan_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            polygon_api_url: std::env::var("POLYGON_API_URL")
                .unwrap_or_else(|_| POLYGON_API_URL.to_string()),
            polygon_api_key: std::env::var("POLYGON_API_KEY").unwrap_or_default(),
            orats_api_url: std::env::var("ORATS_API_URL")
                .unwrap_or_else(|_| ORATS_API_URL.to_string()),
            orats_api_token: std::env::var("ORATS_API_TOKEN").unwrap_or_default(),
            scan_concurrency: std::env::var("SCAN_CONCURRENCY")
                .unwrap_or_else(|_| DEFAULT_SCAN_CONCURRENCY.to_string())
                .parse::<usize>()
                .map_err(|_| {
                    AppError::Config("SCAN_CONCURRENCY must be a positive integer".to_string())
                })?,
        })
    }
}

//! Unusual-options-activity scan core.
//!
//! Reduces option-chain snapshots to per-ticker statistics, evaluates a fixed
//! alert catalog against tier-aware volume baselines, resolves conflicts with
//! a tracked watchlist, and ranks the combined feed. Callers supply the
//! reference data (universe and watchlist), run scans through [`Scanner`],
//! and slice the resulting [`ScanRun`] with [`AlertFilter`] and
//! [`FeedSummary`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod gateway;
pub mod rank;
pub mod rules;
pub mod scan;
pub mod types;
pub mod universe;

pub use aggregate::aggregate;
pub use config::Config;
pub use error::{AppError, Result};
pub use gateway::{HttpGateway, MarketData, TtlCache};
pub use rank::{rank_alerts, resolve_conflicts, AlertFilter, FeedSummary};
pub use rules::{RuleEngine, RuleParams};
pub use scan::Scanner;
pub use types::{
    Alert, AlertCategory, AlertDetail, AlertKind, Bias, ContractRecord, ContractType, DailyQuote,
    ScanMode, ScanProgress, ScanRun, ScanStats, TickerStats,
};
pub use universe::{MarketCapTier, TickerInfo, Universe, Watchlist};

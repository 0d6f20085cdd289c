use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{baseline, QUICK_SCAN_LIMIT};
use crate::types::ScanMode;

/// Sector assigned to symbols absent from the universe tables.
pub const DEFAULT_SECTOR: &str = "Other";

// ---------------------------------------------------------------------------
// Market-cap tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapTier {
    Mega,
    Large,
    Mid,
}

impl MarketCapTier {
    /// Expected daily call volume for this tier, derived from the previous
    /// session's share volume. Per-tier floors keep a thin session from
    /// producing a near-zero baseline that would flag everything.
    pub fn baseline_call_volume(self, prev_share_volume: u64) -> u64 {
        match self {
            MarketCapTier::Mega => {
                (prev_share_volume / baseline::MEGA_DIVISOR).max(baseline::MEGA_FLOOR)
            }
            MarketCapTier::Large => {
                (prev_share_volume / baseline::LARGE_DIVISOR).max(baseline::LARGE_FLOOR)
            }
            MarketCapTier::Mid => {
                (prev_share_volume / baseline::MID_DIVISOR).max(baseline::MID_FLOOR)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketCapTier::Mega => "Mega ($500B+)",
            MarketCapTier::Large => "Large ($50-500B)",
            MarketCapTier::Mid => "Mid ($2-50B)",
        }
    }
}

impl std::fmt::Display for MarketCapTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarketCapTier::Mega => "mega",
            MarketCapTier::Large => "large",
            MarketCapTier::Mid => "mid",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Scan universe
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: String,
    pub sector: String,
    pub tier: MarketCapTier,
}

impl TickerInfo {
    /// Provenance for a symbol the universe tables do not carry.
    pub fn unknown(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            sector: DEFAULT_SECTOR.to_string(),
            tier: MarketCapTier::Mid,
        }
    }
}

/// Ordered, deduplicated list of scannable tickers with their sector and tier
/// provenance. Order is load order and determines scan order.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    entries: Vec<TickerInfo>,
    index: HashMap<String, usize>,
}

impl Universe {
    /// Build from entries, dropping duplicate symbols (first occurrence wins).
    pub fn new(entries: impl IntoIterator<Item = TickerInfo>) -> Self {
        let mut universe = Self::default();
        for entry in entries {
            universe.push(entry);
        }
        universe
    }

    fn push(&mut self, info: TickerInfo) {
        if self.index.contains_key(&info.symbol) {
            return;
        }
        self.index.insert(info.symbol.clone(), self.entries.len());
        self.entries.push(info);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&TickerInfo> {
        self.index.get(symbol).map(|&i| &self.entries[i])
    }

    pub fn sector_of(&self, symbol: &str) -> &str {
        self.get(symbol).map_or(DEFAULT_SECTOR, |i| i.sector.as_str())
    }

    pub fn tier_of(&self, symbol: &str) -> MarketCapTier {
        self.get(symbol).map_or(MarketCapTier::Mid, |i| i.tier)
    }

    pub fn entries(&self) -> &[TickerInfo] {
        &self.entries
    }

    /// Entries a scan of the given mode covers. Quick scans stop at
    /// QUICK_SCAN_LIMIT; full scans take everything.
    pub fn scan_targets(&self, mode: ScanMode) -> &[TickerInfo] {
        match mode {
            ScanMode::Quick => &self.entries[..self.entries.len().min(QUICK_SCAN_LIMIT)],
            ScanMode::Full => &self.entries[..],
        }
    }

    /// Append watchlist symbols the universe does not already carry, with
    /// default provenance, so every tracked ticker gets scanned. Appends in
    /// sorted symbol order to keep scan order reproducible.
    pub fn merge_watchlist(&mut self, watchlist: &Watchlist) {
        let mut missing: Vec<&str> = watchlist
            .symbols()
            .filter(|s| !self.index.contains_key(*s))
            .map(String::as_str)
            .collect();
        missing.sort_unstable();
        for symbol in missing {
            self.push(TickerInfo::unknown(symbol));
        }
    }
}

// ---------------------------------------------------------------------------
// Watchlist
// ---------------------------------------------------------------------------

/// Tracked bullish-thesis tickers, each with an optional expected earnings
/// date. Bearish alerts on these tickers are flagged as conflicts.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    entries: HashMap<String, Option<NaiveDate>>,
}

impl Watchlist {
    pub fn new(entries: impl IntoIterator<Item = (String, Option<NaiveDate>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn next_earnings(&self, symbol: &str) -> Option<NaiveDate> {
        self.entries.get(symbol).copied().flatten()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

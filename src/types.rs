use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::universe::MarketCapTier;

// ---------------------------------------------------------------------------
// Option-chain records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Call,
    Put,
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractType::Call => write!(f, "call"),
            ContractType::Put => write!(f, "put"),
        }
    }
}

/// One option contract out of a chain snapshot, normalized from the provider
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub contract_type: ContractType,
    pub strike: f64,
    /// None when the provider omits the expiration. Such contracts never
    /// count as near-term.
    pub expiry: Option<NaiveDate>,
    pub volume: u64,
    pub open_interest: u64,
    /// Provider-reported IV as a fraction (0.62 = 62%); 0.0 when absent.
    pub implied_volatility: f64,
}

/// Previous trading session's close and share volume for the underlying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyQuote {
    pub close: f64,
    pub volume: u64,
}

// ---------------------------------------------------------------------------
// Per-ticker scan statistics
// ---------------------------------------------------------------------------

/// Everything the rule catalog needs about one ticker, reduced from a single
/// chain snapshot plus the previous-day quote and IV rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerStats {
    pub last_price: f64,
    pub prev_share_volume: u64,
    pub call_volume: u64,
    pub put_volume: u64,
    /// put_volume / call_volume, or PC_RATIO_ALL_PUTS when call volume is zero.
    pub put_call_ratio: f64,
    pub call_open_interest: u64,
    pub put_open_interest: u64,
    /// Highest-volume single contract per side. None when no contract on that
    /// side traded.
    pub max_call_contract: Option<ContractRecord>,
    pub max_put_contract: Option<ContractRecord>,
    /// Largest single-strike call OI and its share of total call OI.
    pub max_strike_call_oi: u64,
    pub call_oi_concentration: f64,
    /// Strike holding the most put OI; None when no put sits at a nonzero
    /// strike. Ties resolve to the lowest strike.
    pub dominant_put_strike: Option<f64>,
    /// Call volume in contracts expiring within the near-term window, and its
    /// share of total call volume.
    pub near_term_call_volume: u64,
    pub near_term_fraction: f64,
    /// Mean call IV in percent; None when no call reported a positive IV.
    pub mean_call_iv: Option<f64>,
    pub iv_rank: Option<f64>,
    pub baseline_call_volume: u64,
    pub baseline_put_volume: u64,
}

impl TickerStats {
    pub fn total_volume(&self) -> u64 {
        self.call_volume + self.put_volume
    }
}

// ---------------------------------------------------------------------------
// Alert catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    #[serde(rename = "CALL_VOL_2X")]
    CallVol2x,
    #[serde(rename = "CALL_VOL_3X")]
    CallVol3x,
    #[serde(rename = "CALL_VOL_5X")]
    CallVol5x,
    PcCollapse,
    LargeBlock,
    InstBlock,
    Sweep,
    #[serde(rename = "OI_SPIKE_25")]
    OiSpike25,
    #[serde(rename = "OI_SPIKE_40")]
    OiSpike40,
    OiSurge,
    IvElevated,
    IvCrush,
    UnusualPut,
    #[serde(rename = "PUT_VOL_3X")]
    PutVol3x,
    BearishBlock,
}

impl AlertKind {
    pub fn category(self) -> AlertCategory {
        match self {
            AlertKind::CallVol2x | AlertKind::CallVol3x | AlertKind::CallVol5x
            | AlertKind::PcCollapse => AlertCategory::Volume,
            AlertKind::LargeBlock | AlertKind::InstBlock | AlertKind::Sweep => AlertCategory::Block,
            AlertKind::OiSpike25 | AlertKind::OiSpike40 | AlertKind::OiSurge => AlertCategory::Oi,
            AlertKind::IvElevated | AlertKind::IvCrush => AlertCategory::Iv,
            AlertKind::UnusualPut | AlertKind::PutVol3x | AlertKind::BearishBlock => {
                AlertCategory::Bearish
            }
        }
    }

    /// Directional read of the alert. Volume, block and OI alerts are
    /// call-side and bullish; IV alerts carry no direction.
    pub fn bias(self) -> Bias {
        match self.category() {
            AlertCategory::Volume | AlertCategory::Block | AlertCategory::Oi => Bias::Bullish,
            AlertCategory::Iv => Bias::Neutral,
            AlertCategory::Bearish => Bias::Bearish,
        }
    }

    /// Human-readable feed label.
    pub fn label(self) -> &'static str {
        match self {
            AlertKind::CallVol2x => "Call Volume 2x Average",
            AlertKind::CallVol3x => "Call Volume 3x Average",
            AlertKind::CallVol5x => "Call Volume 5x Average",
            AlertKind::PcCollapse => "Put/Call Ratio Collapse",
            AlertKind::LargeBlock => "Large Block Trade",
            AlertKind::InstBlock => "Institutional Block 500+ Ctrs",
            AlertKind::Sweep => "Sweep Order Detected",
            AlertKind::OiSpike25 => "Open Interest Spike +25%",
            AlertKind::OiSpike40 => "OI Up 40% Overnight",
            AlertKind::OiSurge => "OI Surge: New Positioning",
            AlertKind::IvElevated => "IV Rank 80th Percentile",
            AlertKind::IvCrush => "IV Crush Risk: Earnings Near",
            AlertKind::UnusualPut => "Unusual Put Activity",
            AlertKind::PutVol3x => "Put Volume 3x Average",
            AlertKind::BearishBlock => "Large Bearish Block",
        }
    }

    /// Stable wire code, matching the serde representation.
    pub fn code(self) -> &'static str {
        match self {
            AlertKind::CallVol2x => "CALL_VOL_2X",
            AlertKind::CallVol3x => "CALL_VOL_3X",
            AlertKind::CallVol5x => "CALL_VOL_5X",
            AlertKind::PcCollapse => "PC_COLLAPSE",
            AlertKind::LargeBlock => "LARGE_BLOCK",
            AlertKind::InstBlock => "INST_BLOCK",
            AlertKind::Sweep => "SWEEP",
            AlertKind::OiSpike25 => "OI_SPIKE_25",
            AlertKind::OiSpike40 => "OI_SPIKE_40",
            AlertKind::OiSurge => "OI_SURGE",
            AlertKind::IvElevated => "IV_ELEVATED",
            AlertKind::IvCrush => "IV_CRUSH",
            AlertKind::UnusualPut => "UNUSUAL_PUT",
            AlertKind::PutVol3x => "PUT_VOL_3X",
            AlertKind::BearishBlock => "BEARISH_BLOCK",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Volume,
    Block,
    Oi,
    Iv,
    Bearish,
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlertCategory::Volume => "volume",
            AlertCategory::Block => "block",
            AlertCategory::Oi => "oi",
            AlertCategory::Iv => "iv",
            AlertCategory::Bearish => "bearish",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Bias::Bullish => "bullish",
            Bias::Bearish => "bearish",
            Bias::Neutral => "neutral",
        };
        write!(f, "{s}")
    }
}

/// Kind-specific numbers behind an alert, kept raw (unrounded) so consumers
/// format them as they see fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertDetail {
    None,
    /// Call volume as a multiple of the baseline.
    VolumeRatio { ratio: f64 },
    /// Largest single print and its estimated premium in dollars.
    Block { contracts: u64, est_notional: f64 },
    Sweep { near_term_volume: u64, fraction: f64 },
    OpenInterest { max_strike_oi: u64, concentration: f64 },
    EarningsWindow { days_out: i64, date: NaiveDate },
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub ticker: String,
    pub kind: AlertKind,
    /// Statistics snapshot the rule fired on.
    pub stats: TickerStats,
    pub detail: AlertDetail,
    pub sector: String,
    pub tier: MarketCapTier,
    pub watchlisted: bool,
    /// Set during conflict resolution: a bearish alert on a watchlisted
    /// (bullish-thesis) ticker.
    pub conflict: bool,
    pub detected_at: DateTime<Utc>,
}

impl Alert {
    pub fn category(&self) -> AlertCategory {
        self.kind.category()
    }

    pub fn bias(&self) -> Bias {
        self.kind.bias()
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

// ---------------------------------------------------------------------------
// Scan runs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// First QUICK_SCAN_LIMIT universe entries only.
    Quick,
    Full,
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::Quick => write!(f, "quick"),
            ScanMode::Full => write!(f, "full"),
        }
    }
}

/// Completed-ticker count published while a scan runs. `done` never decreases
/// within a run and ends equal to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanProgress {
    pub done: usize,
    pub total: usize,
}

impl ScanProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

/// Per-run counters. Skipped tickers are tallied by the reason data was
/// missing, so an empty feed is distinguishable from a dead provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Tickers attempted.
    pub scanned: usize,
    /// Tickers that produced a usable aggregate and reached rule evaluation.
    pub evaluated: usize,
    pub no_snapshot: usize,
    pub no_quote: usize,
}

/// One scan's complete result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRun {
    pub mode: ScanMode,
    /// Tickers covered, in universe order.
    pub tickers: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stats: ScanStats,
    /// Ranked: watchlisted tickers first, conflicts surfaced within that
    /// group, detection order otherwise.
    pub alerts: Vec<Alert>,
}

impl ScanRun {
    /// True when no ticker yielded usable data. A clean scan that simply
    /// found nothing unusual returns false here.
    pub fn found_no_data(&self) -> bool {
        self.stats.evaluated == 0
    }
}

use std::collections::BTreeSet;

use crate::types::{Alert, AlertCategory, Bias};
use crate::universe::MarketCapTier;

/// Mark every bearish alert on a watchlisted ticker as a conflict: smart
/// money positioned against the tracked bullish thesis. Evaluation never sets
/// the flag itself, so resolution is a single pass here.
pub fn resolve_conflicts(alerts: &mut [Alert]) {
    for alert in alerts.iter_mut() {
        if alert.watchlisted && alert.bias() == Bias::Bearish {
            alert.conflict = true;
        }
    }
}

/// Order alerts for presentation: watchlisted tickers first, conflicts
/// surfaced within that group. The sort is stable, so detection order (the
/// universe order) remains the tiebreak and the result is independent of how
/// the scan was scheduled.
pub fn rank_alerts(alerts: &mut [Alert]) {
    alerts.sort_by_key(|a| (!a.watchlisted, !a.conflict));
}

// ---------------------------------------------------------------------------
// Feed filters
// ---------------------------------------------------------------------------

/// Conjunction of optional feed filters; `None` fields pass everything.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub category: Option<AlertCategory>,
    pub sector: Option<String>,
    pub tier: Option<MarketCapTier>,
    pub watchlist_only: bool,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        self.category.map_or(true, |c| alert.category() == c)
            && self.sector.as_ref().map_or(true, |s| alert.sector == *s)
            && self.tier.map_or(true, |t| alert.tier == t)
            && (!self.watchlist_only || alert.watchlisted)
    }

    /// Filtered copy of `alerts`, preserving order.
    pub fn apply(&self, alerts: &[Alert]) -> Vec<Alert> {
        alerts.iter().filter(|a| self.matches(a)).cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Feed summary
// ---------------------------------------------------------------------------

/// Headline counts over an alert list (usually a filtered one).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub total: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub watchlisted: usize,
    pub conflicts: usize,
    /// Tickers carrying at least one conflict, sorted and deduplicated.
    pub conflicted_tickers: Vec<String>,
}

impl FeedSummary {
    pub fn of(alerts: &[Alert]) -> Self {
        let mut summary = Self::default();
        let mut conflicted: BTreeSet<String> = BTreeSet::new();

        for alert in alerts {
            summary.total += 1;
            match alert.bias() {
                Bias::Bullish => summary.bullish += 1,
                Bias::Bearish => summary.bearish += 1,
                Bias::Neutral => {}
            }
            if alert.watchlisted {
                summary.watchlisted += 1;
            }
            if alert.conflict {
                summary.conflicts += 1;
                conflicted.insert(alert.ticker.clone());
            }
        }

        summary.conflicted_tickers = conflicted.into_iter().collect();
        summary
    }
}

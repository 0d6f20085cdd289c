use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::gateway::MarketData;
use crate::rank::{rank_alerts, resolve_conflicts};
use crate::rules::RuleEngine;
use crate::types::{Alert, ScanMode, ScanProgress, ScanRun, ScanStats};
use crate::universe::{TickerInfo, Universe, Watchlist};

/// Outcome of one ticker's pipeline, slotted back by universe position.
enum TickerOutcome {
    Evaluated(Vec<Alert>),
    NoSnapshot,
    NoQuote,
}

/// Drives the fetch, aggregate, evaluate pipeline across the universe with
/// bounded fan-out. Per-ticker failures are counted and skipped, never fatal.
pub struct Scanner {
    gateway: Arc<dyn MarketData>,
    universe: Universe,
    watchlist: Watchlist,
    engine: RuleEngine,
    concurrency: usize,
}

impl Scanner {
    pub fn new(
        gateway: Arc<dyn MarketData>,
        universe: Universe,
        watchlist: Watchlist,
        cfg: &Config,
    ) -> Self {
        Self {
            gateway,
            universe,
            watchlist,
            engine: RuleEngine::default(),
            concurrency: cfg.scan_concurrency.max(1),
        }
    }

    /// Swap in non-default rule thresholds.
    pub fn with_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Run one scan and return a fresh, fully ranked `ScanRun`.
    ///
    /// Pipelines complete in whatever order the scheduler picks; outcomes are
    /// slotted by universe index, so the ranked output is identical for any
    /// concurrency. When a progress sender is supplied, an update goes out
    /// after every completed ticker and `done` only ever grows, ending at
    /// `total`.
    pub async fn run(
        &self,
        mode: ScanMode,
        progress: Option<watch::Sender<ScanProgress>>,
    ) -> ScanRun {
        let targets = self.universe.scan_targets(mode);
        let total = targets.len();
        let started_at = Utc::now();
        let started = Instant::now();
        let today = started_at.date_naive();

        info!("[SCAN] {mode} scan starting: {total} tickers");
        if let Some(tx) = &progress {
            let _ = tx.send(ScanProgress { done: 0, total });
        }

        let mut stats = ScanStats { scanned: total, ..Default::default() };
        let mut slots: Vec<Option<Vec<Alert>>> = (0..total).map(|_| None).collect();

        let mut results = stream::iter(
            targets
                .iter()
                .enumerate()
                .map(|(idx, info)| async move { (idx, self.scan_ticker(info, today).await) }),
        )
        .buffer_unordered(self.concurrency);

        let mut done = 0usize;
        while let Some((idx, outcome)) = results.next().await {
            match outcome {
                TickerOutcome::Evaluated(alerts) => {
                    stats.evaluated += 1;
                    slots[idx] = Some(alerts);
                }
                TickerOutcome::NoSnapshot => stats.no_snapshot += 1,
                TickerOutcome::NoQuote => stats.no_quote += 1,
            }
            done += 1;
            if let Some(tx) = &progress {
                let _ = tx.send(ScanProgress { done, total });
            }
        }
        drop(results);

        let mut alerts: Vec<Alert> = slots.into_iter().flatten().flatten().collect();
        resolve_conflicts(&mut alerts);
        rank_alerts(&mut alerts);

        info!(
            "[SCAN] {mode} scan complete: {} alerts, {}/{total} tickers evaluated \
             ({} no snapshot, {} no quote) in {}ms",
            alerts.len(),
            stats.evaluated,
            stats.no_snapshot,
            stats.no_quote,
            started.elapsed().as_millis()
        );

        ScanRun {
            mode,
            tickers: targets.iter().map(|t| t.symbol.clone()).collect(),
            started_at,
            finished_at: Utc::now(),
            stats,
            alerts,
        }
    }

    /// One ticker's pipeline. Fetch order matches the exclusion rules: an
    /// empty snapshot skips the quote lookup, and a missing or non-positive
    /// close skips the IV lookup.
    async fn scan_ticker(&self, info: &TickerInfo, today: NaiveDate) -> TickerOutcome {
        let snapshot = self.gateway.options_snapshot(&info.symbol).await;
        if snapshot.is_empty() {
            debug!("[SCAN] {}: no options snapshot, skipping", info.symbol);
            return TickerOutcome::NoSnapshot;
        }

        let Some(quote) = self.gateway.daily_quote(&info.symbol).await else {
            debug!("[SCAN] {}: no previous-day quote, skipping", info.symbol);
            return TickerOutcome::NoQuote;
        };
        if quote.close <= 0.0 {
            debug!("[SCAN] {}: unusable close price, skipping", info.symbol);
            return TickerOutcome::NoQuote;
        }

        let iv_rank = self.gateway.iv_rank(&info.symbol).await;

        match aggregate(&snapshot, &quote, iv_rank, info.tier, today) {
            Some(stats) => {
                let alerts =
                    self.engine
                        .evaluate(info, &stats, &self.watchlist, today, Utc::now());
                if !alerts.is_empty() {
                    debug!("[SCAN] {}: {} alerts raised", info.symbol, alerts.len());
                }
                TickerOutcome::Evaluated(alerts)
            }
            None => TickerOutcome::NoQuote,
        }
    }
}

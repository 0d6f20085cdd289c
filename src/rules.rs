use chrono::{DateTime, NaiveDate, Utc};

use crate::config::CONTRACT_MULTIPLIER;
use crate::types::{Alert, AlertDetail, AlertKind, TickerStats};
use crate::universe::{TickerInfo, Watchlist};

// ---------------------------------------------------------------------------
// Rule parameters
// ---------------------------------------------------------------------------

/// Thresholds for the alert catalog. `Default` carries the reference values;
/// every trigger reads from here so the catalog stays tunable in one place.
#[derive(Debug, Clone)]
pub struct RuleParams {
    /// Call-volume tiers: group gate, top-tier volume floor, multiples.
    pub call_volume_floor: u64,
    pub call_vol_5x_min_volume: u64,
    pub call_ratio_5x: f64,
    pub call_ratio_3x: f64,
    pub call_ratio_2x: f64,
    /// Put/call collapse: ratio ceiling and total-volume multiple of baseline.
    pub pc_collapse_max_ratio: f64,
    pub pc_collapse_volume_factor: f64,
    /// Block tiers: contract floors, premium floors, assumed deltas.
    pub block_min_contracts: u64,
    pub inst_block_contracts: u64,
    pub inst_block_notional: f64,
    pub large_block_notional: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    /// Sweep proxy: near-term volume floor and concentration.
    pub sweep_min_volume: u64,
    pub sweep_min_fraction: f64,
    /// Open-interest tiers.
    pub oi_spike_min: u64,
    pub oi_spike_40_min: u64,
    pub oi_spike_40_concentration: f64,
    pub oi_surge_min: u64,
    pub oi_surge_concentration: f64,
    /// IV rules.
    pub iv_elevated_rank: f64,
    pub iv_crush_rank: f64,
    pub earnings_window_days: i64,
    /// Bearish volume tiers.
    pub put_volume_floor: u64,
    pub put_3x_ratio: f64,
    pub put_3x_baseline_factor: u64,
    pub unusual_put_ratio: f64,
    pub unusual_put_baseline_factor: u64,
    /// Bearish block: premium floor and dominant-strike headroom over spot.
    pub bearish_block_notional: f64,
    pub bearish_strike_headroom: f64,
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            call_volume_floor: 500,
            call_vol_5x_min_volume: 1_000,
            call_ratio_5x: 5.0,
            call_ratio_3x: 3.0,
            call_ratio_2x: 2.0,
            pc_collapse_max_ratio: 0.40,
            pc_collapse_volume_factor: 1.5,
            block_min_contracts: 200,
            inst_block_contracts: 500,
            inst_block_notional: 500_000.0,
            large_block_notional: 100_000.0,
            call_delta: 0.40,
            put_delta: 0.35,
            sweep_min_volume: 300,
            sweep_min_fraction: 0.40,
            oi_spike_min: 1_000,
            oi_spike_40_min: 2_000,
            oi_spike_40_concentration: 0.25,
            oi_surge_min: 5_000,
            oi_surge_concentration: 0.35,
            iv_elevated_rank: 80.0,
            iv_crush_rank: 50.0,
            earnings_window_days: 14,
            put_volume_floor: 500,
            put_3x_ratio: 3.0,
            put_3x_baseline_factor: 3,
            unusual_put_ratio: 1.5,
            unusual_put_baseline_factor: 2,
            bearish_block_notional: 150_000.0,
            bearish_strike_headroom: 1.02,
        }
    }
}

// ---------------------------------------------------------------------------
// Rule engine
// ---------------------------------------------------------------------------

/// Evaluates the fixed alert catalog against one ticker's statistics.
///
/// Stateless and deterministic: the same inputs always produce the same
/// alerts in the same order. The four exclusive groups (call-volume tiers,
/// call-block tiers, OI tiers, bearish-volume tiers) test their highest tier
/// first and emit at most one alert each; the remaining rules fire
/// independently and stack. Alerts leave here with `conflict` unset; marking
/// conflicts is the ranker's job.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    pub params: RuleParams,
}

impl RuleEngine {
    pub fn new(params: RuleParams) -> Self {
        Self { params }
    }

    pub fn evaluate(
        &self,
        info: &TickerInfo,
        stats: &TickerStats,
        watchlist: &Watchlist,
        today: NaiveDate,
        detected_at: DateTime<Utc>,
    ) -> Vec<Alert> {
        let p = &self.params;
        let watchlisted = watchlist.contains(&info.symbol);
        let price = stats.last_price;
        let mut alerts = Vec::new();

        let mut push = |kind: AlertKind, detail: AlertDetail| {
            alerts.push(Alert {
                ticker: info.symbol.clone(),
                kind,
                stats: stats.clone(),
                detail,
                sector: info.sector.clone(),
                tier: info.tier,
                watchlisted,
                conflict: false,
                detected_at,
            });
        };

        // Call-volume tiers.
        if stats.call_volume >= p.call_volume_floor && stats.baseline_call_volume > 0 {
            let ratio = stats.call_volume as f64 / stats.baseline_call_volume as f64;
            if ratio >= p.call_ratio_5x && stats.call_volume >= p.call_vol_5x_min_volume {
                push(AlertKind::CallVol5x, AlertDetail::VolumeRatio { ratio });
            } else if ratio >= p.call_ratio_3x && stats.call_volume >= p.call_volume_floor {
                push(AlertKind::CallVol3x, AlertDetail::VolumeRatio { ratio });
            } else if ratio >= p.call_ratio_2x && stats.call_volume >= p.call_volume_floor {
                push(AlertKind::CallVol2x, AlertDetail::VolumeRatio { ratio });
            }
        }

        // Put/call collapse: calls crowding out puts on elevated total volume.
        if stats.put_call_ratio < p.pc_collapse_max_ratio
            && stats.total_volume()
                >= (stats.baseline_call_volume as f64 * p.pc_collapse_volume_factor) as u64
            && stats.call_volume >= p.call_volume_floor
        {
            push(AlertKind::PcCollapse, AlertDetail::None);
        }

        // Call-block tiers: institutional size outranks large.
        if let Some(block) = &stats.max_call_contract {
            if block.volume >= p.block_min_contracts {
                let est_notional = block.volume as f64 * price * p.call_delta * CONTRACT_MULTIPLIER;
                if block.volume >= p.inst_block_contracts && est_notional >= p.inst_block_notional {
                    push(
                        AlertKind::InstBlock,
                        AlertDetail::Block { contracts: block.volume, est_notional },
                    );
                } else if block.volume >= p.block_min_contracts
                    && est_notional >= p.large_block_notional
                {
                    push(
                        AlertKind::LargeBlock,
                        AlertDetail::Block { contracts: block.volume, est_notional },
                    );
                }
            }
        }

        // Sweep proxy: call volume concentrated in near-term expiries.
        if stats.near_term_call_volume >= p.sweep_min_volume
            && stats.call_volume > 0
            && stats.near_term_fraction >= p.sweep_min_fraction
        {
            push(
                AlertKind::Sweep,
                AlertDetail::Sweep {
                    near_term_volume: stats.near_term_call_volume,
                    fraction: stats.near_term_fraction,
                },
            );
        }

        // Open-interest tiers: surge outranks both spikes.
        if stats.max_strike_call_oi >= p.oi_spike_min && stats.call_open_interest > 0 {
            let max_oi = stats.max_strike_call_oi;
            let concentration = stats.call_oi_concentration;
            if concentration >= p.oi_surge_concentration && max_oi >= p.oi_surge_min {
                push(
                    AlertKind::OiSurge,
                    AlertDetail::OpenInterest { max_strike_oi: max_oi, concentration },
                );
            } else if concentration >= p.oi_spike_40_concentration && max_oi >= p.oi_spike_40_min {
                push(
                    AlertKind::OiSpike40,
                    AlertDetail::OpenInterest { max_strike_oi: max_oi, concentration },
                );
            } else if max_oi >= p.oi_spike_min {
                push(
                    AlertKind::OiSpike25,
                    AlertDetail::OpenInterest { max_strike_oi: max_oi, concentration },
                );
            }
        }

        // IV rules are independent of each other: an elevated rank and an
        // earnings window can both fire for the same ticker.
        if let Some(iv_rank) = stats.iv_rank {
            if iv_rank >= p.iv_elevated_rank {
                push(AlertKind::IvElevated, AlertDetail::None);
            }
            if let Some(earnings) = watchlist.next_earnings(&info.symbol) {
                let days_out = (earnings - today).num_days();
                if (0..=p.earnings_window_days).contains(&days_out) && iv_rank >= p.iv_crush_rank {
                    push(
                        AlertKind::IvCrush,
                        AlertDetail::EarningsWindow { days_out, date: earnings },
                    );
                }
            }
        }

        // Bearish volume tiers.
        if stats.put_volume >= p.put_volume_floor {
            if stats.put_call_ratio >= p.put_3x_ratio
                && stats.put_volume >= stats.baseline_put_volume * p.put_3x_baseline_factor
            {
                push(AlertKind::PutVol3x, AlertDetail::None);
            } else if stats.put_call_ratio >= p.unusual_put_ratio
                && stats.put_volume >= stats.baseline_put_volume * p.unusual_put_baseline_factor
            {
                push(AlertKind::UnusualPut, AlertDetail::None);
            }
        }

        // Bearish block: a large put print whose dominant strike sits at or
        // below spot plus headroom. A missing dominant strike passes the
        // strike test.
        if let Some(block) = &stats.max_put_contract {
            if block.volume >= p.block_min_contracts {
                let est_notional = block.volume as f64 * price * p.put_delta * CONTRACT_MULTIPLIER;
                let dominant_strike = stats.dominant_put_strike.unwrap_or(0.0);
                if est_notional >= p.bearish_block_notional
                    && dominant_strike <= price * p.bearish_strike_headroom
                {
                    push(
                        AlertKind::BearishBlock,
                        AlertDetail::Block { contracts: block.volume, est_notional },
                    );
                }
            }
        }

        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bias, ContractRecord, ContractType};
    use crate::universe::MarketCapTier;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 30, 0).unwrap()
    }

    fn info(symbol: &str) -> TickerInfo {
        TickerInfo {
            symbol: symbol.to_string(),
            sector: "Technology".to_string(),
            tier: MarketCapTier::Mid,
        }
    }

    /// Stats that trigger nothing: every group sits below its gate.
    fn quiet_stats() -> TickerStats {
        TickerStats {
            last_price: 50.0,
            prev_share_volume: 1_000_000,
            call_volume: 100,
            put_volume: 40,
            put_call_ratio: 0.4,
            call_open_interest: 500,
            put_open_interest: 200,
            max_call_contract: None,
            max_put_contract: None,
            max_strike_call_oi: 0,
            call_oi_concentration: 0.0,
            dominant_put_strike: None,
            near_term_call_volume: 0,
            near_term_fraction: 0.0,
            mean_call_iv: None,
            iv_rank: None,
            baseline_call_volume: 1_000,
            baseline_put_volume: 700,
        }
    }

    fn call_block(volume: u64) -> ContractRecord {
        ContractRecord {
            contract_type: ContractType::Call,
            strike: 55.0,
            expiry: None,
            volume,
            open_interest: 0,
            implied_volatility: 0.0,
        }
    }

    fn put_block(volume: u64) -> ContractRecord {
        ContractRecord {
            contract_type: ContractType::Put,
            strike: 45.0,
            expiry: None,
            volume,
            open_interest: 0,
            implied_volatility: 0.0,
        }
    }

    fn eval(stats: &TickerStats) -> Vec<Alert> {
        eval_with(stats, &Watchlist::default())
    }

    fn eval_with(stats: &TickerStats, watchlist: &Watchlist) -> Vec<Alert> {
        RuleEngine::default().evaluate(&info("XYZ"), stats, watchlist, today(), now())
    }

    fn kinds(alerts: &[Alert]) -> Vec<AlertKind> {
        alerts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn quiet_stats_raise_nothing() {
        assert!(eval(&quiet_stats()).is_empty());
    }

    #[test]
    fn call_volume_top_tier_wins() {
        let mut stats = quiet_stats();
        stats.call_volume = 1_200;
        stats.baseline_call_volume = 200;

        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::CallVol5x]);
        assert_eq!(alerts[0].detail, AlertDetail::VolumeRatio { ratio: 6.0 });
        assert_eq!(alerts[0].ticker, "XYZ");
        assert_eq!(alerts[0].sector, "Technology");
        assert_eq!(alerts[0].tier, MarketCapTier::Mid);
        assert_eq!(alerts[0].bias(), Bias::Bullish);
    }

    #[test]
    fn high_ratio_below_top_tier_volume_falls_to_3x() {
        // Ratio 9x but under the 1000-contract top-tier floor.
        let mut stats = quiet_stats();
        stats.call_volume = 900;
        stats.baseline_call_volume = 100;

        assert_eq!(kinds(&eval(&stats)), vec![AlertKind::CallVol3x]);
    }

    #[test]
    fn call_volume_2x_tier() {
        let mut stats = quiet_stats();
        stats.call_volume = 600;
        stats.baseline_call_volume = 250;

        assert_eq!(kinds(&eval(&stats)), vec![AlertKind::CallVol2x]);
    }

    #[test]
    fn call_volume_group_needs_absolute_floor() {
        let mut stats = quiet_stats();
        stats.call_volume = 400;
        stats.baseline_call_volume = 100;

        assert!(eval(&stats).is_empty());
    }

    #[test]
    fn pc_collapse_fires_on_crowded_calls() {
        let mut stats = quiet_stats();
        stats.call_volume = 900;
        stats.put_volume = 90;
        stats.put_call_ratio = 0.1;
        stats.baseline_call_volume = 500; // ratio 1.8, below the 2x tier

        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::PcCollapse]);
        assert_eq!(alerts[0].detail, AlertDetail::None);
    }

    #[test]
    fn pc_collapse_needs_total_volume_over_baseline() {
        let mut stats = quiet_stats();
        stats.call_volume = 600;
        stats.put_volume = 0;
        stats.put_call_ratio = 0.0;
        stats.baseline_call_volume = 1_000; // total 600 < 1500

        assert!(eval(&stats).is_empty());
    }

    #[test]
    fn institutional_block_outranks_large() {
        let mut stats = quiet_stats();
        stats.max_call_contract = Some(call_block(600));

        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::InstBlock]);
        // 600 contracts * $50 * 0.40 delta * 100 shares = $1.2M premium.
        assert_eq!(
            alerts[0].detail,
            AlertDetail::Block { contracts: 600, est_notional: 1_200_000.0 }
        );
    }

    #[test]
    fn big_notional_with_small_size_is_still_large_block() {
        // Premium clears the institutional floor but size does not.
        let mut stats = quiet_stats();
        stats.max_call_contract = Some(call_block(300));

        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::LargeBlock]);
        assert_eq!(
            alerts[0].detail,
            AlertDetail::Block { contracts: 300, est_notional: 600_000.0 }
        );
    }

    #[test]
    fn block_below_premium_floor_is_silent() {
        let mut stats = quiet_stats();
        stats.last_price = 5.0;
        stats.max_call_contract = Some(call_block(250));
        // 250 * $5 * 0.40 * 100 = $50k, under the $100k floor.

        assert!(eval(&stats).is_empty());
    }

    #[test]
    fn sweep_needs_concentration_and_volume() {
        let mut stats = quiet_stats();
        stats.call_volume = 900;
        stats.near_term_call_volume = 400;
        stats.near_term_fraction = 400.0 / 900.0;

        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::Sweep]);
        assert_eq!(
            alerts[0].detail,
            AlertDetail::Sweep { near_term_volume: 400, fraction: 400.0 / 900.0 }
        );
    }

    #[test]
    fn sweep_below_volume_floor_is_silent() {
        let mut stats = quiet_stats();
        stats.call_volume = 400;
        stats.near_term_call_volume = 250;
        stats.near_term_fraction = 0.625;

        assert!(eval(&stats).is_empty());
    }

    #[test]
    fn oi_tiers_are_exclusive() {
        let mut surge = quiet_stats();
        surge.max_strike_call_oi = 6_000;
        surge.call_open_interest = 15_000;
        surge.call_oi_concentration = 0.40;
        assert_eq!(kinds(&eval(&surge)), vec![AlertKind::OiSurge]);

        let mut spike_40 = quiet_stats();
        spike_40.max_strike_call_oi = 2_500;
        spike_40.call_open_interest = 8_000;
        spike_40.call_oi_concentration = 0.30;
        assert_eq!(kinds(&eval(&spike_40)), vec![AlertKind::OiSpike40]);

        let mut spike_25 = quiet_stats();
        spike_25.max_strike_call_oi = 1_500;
        spike_25.call_open_interest = 15_000;
        spike_25.call_oi_concentration = 0.10;
        assert_eq!(kinds(&eval(&spike_25)), vec![AlertKind::OiSpike25]);

        let mut below = quiet_stats();
        below.max_strike_call_oi = 900;
        below.call_open_interest = 2_000;
        below.call_oi_concentration = 0.45;
        assert!(eval(&below).is_empty());
    }

    #[test]
    fn high_concentration_without_surge_size_falls_through() {
        // Concentration clears the surge bar but absolute OI does not, so the
        // 40% tier catches it.
        let mut stats = quiet_stats();
        stats.max_strike_call_oi = 3_000;
        stats.call_open_interest = 6_000;
        stats.call_oi_concentration = 0.50;

        assert_eq!(kinds(&eval(&stats)), vec![AlertKind::OiSpike40]);
    }

    #[test]
    fn iv_elevated_boundary() {
        let mut stats = quiet_stats();
        stats.iv_rank = Some(80.0);
        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::IvElevated]);
        assert_eq!(alerts[0].bias(), Bias::Neutral);

        stats.iv_rank = Some(79.9);
        assert!(eval(&stats).is_empty());
    }

    #[test]
    fn iv_crush_respects_earnings_window() {
        let mut stats = quiet_stats();
        stats.iv_rank = Some(55.0);

        let in_window = Watchlist::new([(
            "XYZ".to_string(),
            Some(today() + chrono::Duration::days(14)),
        )]);
        let alerts = eval_with(&stats, &in_window);
        assert_eq!(kinds(&alerts), vec![AlertKind::IvCrush]);
        assert_eq!(
            alerts[0].detail,
            AlertDetail::EarningsWindow {
                days_out: 14,
                date: today() + chrono::Duration::days(14)
            }
        );

        let past_window = Watchlist::new([(
            "XYZ".to_string(),
            Some(today() + chrono::Duration::days(15)),
        )]);
        assert!(eval_with(&stats, &past_window).is_empty());

        let already_reported = Watchlist::new([(
            "XYZ".to_string(),
            Some(today() - chrono::Duration::days(1)),
        )]);
        assert!(eval_with(&stats, &already_reported).is_empty());

        let low_rank = {
            let mut s = quiet_stats();
            s.iv_rank = Some(49.9);
            s
        };
        assert!(eval_with(&low_rank, &in_window).is_empty());
    }

    #[test]
    fn earnings_today_counts_as_in_window() {
        let mut stats = quiet_stats();
        stats.iv_rank = Some(60.0);
        let watchlist = Watchlist::new([("XYZ".to_string(), Some(today()))]);

        let alerts = eval_with(&stats, &watchlist);
        assert_eq!(kinds(&alerts), vec![AlertKind::IvCrush]);
        assert_eq!(
            alerts[0].detail,
            AlertDetail::EarningsWindow { days_out: 0, date: today() }
        );
    }

    #[test]
    fn both_iv_rules_can_fire_together() {
        let mut stats = quiet_stats();
        stats.iv_rank = Some(85.0);
        let watchlist =
            Watchlist::new([("XYZ".to_string(), Some(today() + chrono::Duration::days(7)))]);

        let alerts = eval_with(&stats, &watchlist);
        assert_eq!(kinds(&alerts), vec![AlertKind::IvElevated, AlertKind::IvCrush]);
    }

    #[test]
    fn elevated_iv_without_earnings_is_a_single_neutral_alert() {
        let mut stats = quiet_stats();
        stats.iv_rank = Some(85.0);
        // Watchlisted, but with no expected earnings date.
        let watchlist = Watchlist::new([("XYZ".to_string(), None)]);

        let alerts = eval_with(&stats, &watchlist);
        assert_eq!(kinds(&alerts), vec![AlertKind::IvElevated]);
        assert_eq!(alerts[0].bias(), Bias::Neutral);
        assert!(alerts[0].watchlisted);
        assert!(!alerts[0].conflict);
    }

    #[test]
    fn put_volume_top_tier_wins() {
        let mut stats = quiet_stats();
        stats.put_volume = 600;
        stats.call_volume = 150;
        stats.put_call_ratio = 4.0;
        stats.baseline_put_volume = 100;

        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::PutVol3x]);
        assert_eq!(alerts[0].bias(), Bias::Bearish);
        assert!(!alerts[0].conflict);
    }

    #[test]
    fn moderate_put_skew_is_unusual_put() {
        let mut stats = quiet_stats();
        stats.put_volume = 600;
        stats.call_volume = 330;
        stats.put_call_ratio = 600.0 / 330.0; // ~1.8
        stats.baseline_put_volume = 250;

        assert_eq!(kinds(&eval(&stats)), vec![AlertKind::UnusualPut]);
    }

    #[test]
    fn put_tiers_need_volume_floor() {
        let mut stats = quiet_stats();
        stats.put_volume = 450;
        stats.call_volume = 100;
        stats.put_call_ratio = 4.5;
        stats.baseline_put_volume = 100;

        assert!(eval(&stats).is_empty());
    }

    #[test]
    fn bearish_block_requires_strike_at_or_below_headroom() {
        let mut stats = quiet_stats();
        stats.last_price = 100.0;
        stats.max_put_contract = Some(put_block(300));
        // 300 * $100 * 0.35 * 100 = $1.05M premium.

        stats.dominant_put_strike = Some(105.0); // above 102 headroom
        assert!(eval(&stats).is_empty());

        stats.dominant_put_strike = Some(101.0);
        let alerts = eval(&stats);
        assert_eq!(kinds(&alerts), vec![AlertKind::BearishBlock]);
        assert_eq!(
            alerts[0].detail,
            AlertDetail::Block { contracts: 300, est_notional: 1_050_000.0 }
        );

        // No dominant strike at all passes the strike test.
        stats.dominant_put_strike = None;
        assert_eq!(kinds(&eval(&stats)), vec![AlertKind::BearishBlock]);
    }

    #[test]
    fn bearish_block_below_premium_floor_is_silent() {
        let mut stats = quiet_stats();
        stats.last_price = 10.0;
        stats.max_put_contract = Some(put_block(250));
        stats.dominant_put_strike = Some(9.0);
        // 250 * $10 * 0.35 * 100 = $87.5k, under the $150k floor.

        assert!(eval(&stats).is_empty());
    }

    #[test]
    fn independent_groups_stack_in_catalog_order() {
        let mut stats = quiet_stats();
        stats.call_volume = 1_200;
        stats.baseline_call_volume = 200;
        stats.put_call_ratio = 1.0; // keeps pc-collapse quiet
        stats.max_call_contract = Some(call_block(600));
        stats.max_strike_call_oi = 6_000;
        stats.call_open_interest = 15_000;
        stats.call_oi_concentration = 0.40;
        stats.iv_rank = Some(85.0);

        let alerts = eval(&stats);
        assert_eq!(
            kinds(&alerts),
            vec![
                AlertKind::CallVol5x,
                AlertKind::InstBlock,
                AlertKind::OiSurge,
                AlertKind::IvElevated,
            ]
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let mut stats = quiet_stats();
        stats.call_volume = 1_200;
        stats.baseline_call_volume = 200;
        stats.iv_rank = Some(85.0);

        let first = eval(&stats);
        let second = eval(&stats);
        assert_eq!(first, second);
    }
}

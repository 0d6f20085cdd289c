use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::config::{baseline, NEAR_TERM_WINDOW_DAYS, PC_RATIO_ALL_PUTS};
use crate::types::{ContractRecord, ContractType, DailyQuote, TickerStats};
use crate::universe::MarketCapTier;

/// Strikes become integer keys (cents) so open interest can accumulate in a
/// BTreeMap without floating-point keys.
#[inline]
fn strike_key(strike: f64) -> u32 {
    (strike * 100.0).round() as u32
}

#[inline]
fn key_to_strike(key: u32) -> f64 {
    key as f64 / 100.0
}

/// Reduce one ticker's chain snapshot to the statistics the rule catalog
/// evaluates.
///
/// Returns None for an empty snapshot or a non-positive close: missing data
/// is not evidence of inactivity, so such tickers are excluded from rule
/// evaluation instead of being scored as zero activity. All ratios are
/// guarded; a zero denominator yields the documented sentinel or 0.0, never
/// a NaN.
pub fn aggregate(
    snapshot: &[ContractRecord],
    quote: &DailyQuote,
    iv_rank: Option<f64>,
    tier: MarketCapTier,
    today: NaiveDate,
) -> Option<TickerStats> {
    if snapshot.is_empty() || quote.close <= 0.0 {
        return None;
    }

    let near_term_cutoff = today + Duration::days(NEAR_TERM_WINDOW_DAYS);

    let mut call_volume = 0u64;
    let mut put_volume = 0u64;
    let mut call_open_interest = 0u64;
    let mut put_open_interest = 0u64;
    let mut max_call_contract: Option<ContractRecord> = None;
    let mut max_put_contract: Option<ContractRecord> = None;
    let mut call_oi_by_strike: BTreeMap<u32, u64> = BTreeMap::new();
    let mut put_oi_by_strike: BTreeMap<u32, u64> = BTreeMap::new();
    let mut near_term_call_volume = 0u64;
    let mut call_iv_sum = 0.0f64;
    let mut call_iv_count = 0u32;

    for contract in snapshot {
        match contract.contract_type {
            ContractType::Call => {
                call_volume += contract.volume;
                call_open_interest += contract.open_interest;
                if contract.implied_volatility > 0.0 {
                    call_iv_sum += contract.implied_volatility * 100.0;
                    call_iv_count += 1;
                }
                if strike_key(contract.strike) != 0 {
                    *call_oi_by_strike.entry(strike_key(contract.strike)).or_insert(0) +=
                        contract.open_interest;
                }
                // Strictly greater, so the first contract wins volume ties
                // and a zero-volume chain leaves no max contract.
                if contract.volume > max_call_contract.as_ref().map_or(0, |m| m.volume) {
                    max_call_contract = Some(contract.clone());
                }
                if contract.expiry.map_or(false, |e| e <= near_term_cutoff) {
                    near_term_call_volume += contract.volume;
                }
            }
            ContractType::Put => {
                put_volume += contract.volume;
                put_open_interest += contract.open_interest;
                if strike_key(contract.strike) != 0 {
                    *put_oi_by_strike.entry(strike_key(contract.strike)).or_insert(0) +=
                        contract.open_interest;
                }
                if contract.volume > max_put_contract.as_ref().map_or(0, |m| m.volume) {
                    max_put_contract = Some(contract.clone());
                }
            }
        }
    }

    let put_call_ratio = if call_volume > 0 {
        put_volume as f64 / call_volume as f64
    } else {
        PC_RATIO_ALL_PUTS
    };

    let max_strike_call_oi = call_oi_by_strike.values().copied().max().unwrap_or(0);
    let call_oi_concentration = if call_open_interest > 0 {
        max_strike_call_oi as f64 / call_open_interest as f64
    } else {
        0.0
    };

    // Unlike the max-volume contracts, the dominant put strike is defined
    // whenever any put sits at a nonzero strike, even with zero OI
    // everywhere. Ties resolve to the lowest strike.
    let mut dominant: Option<(u32, u64)> = None;
    for (&key, &oi) in &put_oi_by_strike {
        if dominant.map_or(true, |(_, best)| oi > best) {
            dominant = Some((key, oi));
        }
    }
    let dominant_put_strike = dominant.map(|(key, _)| key_to_strike(key));

    let near_term_fraction = if call_volume > 0 {
        near_term_call_volume as f64 / call_volume as f64
    } else {
        0.0
    };

    let mean_call_iv = if call_iv_count > 0 {
        Some(call_iv_sum / call_iv_count as f64)
    } else {
        None
    };

    let baseline_call_volume = tier.baseline_call_volume(quote.volume);
    let baseline_put_volume = (baseline_call_volume as f64 * baseline::PUT_FACTOR) as u64;

    Some(TickerStats {
        last_price: quote.close,
        prev_share_volume: quote.volume,
        call_volume,
        put_volume,
        put_call_ratio,
        call_open_interest,
        put_open_interest,
        max_call_contract,
        max_put_contract,
        max_strike_call_oi,
        call_oi_concentration,
        dominant_put_strike,
        near_term_call_volume,
        near_term_fraction,
        mean_call_iv,
        iv_rank,
        baseline_call_volume,
        baseline_put_volume,
    })
}

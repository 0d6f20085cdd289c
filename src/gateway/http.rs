use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{
    Config, IV_RANK_CACHE_TTL_SECS, IV_RANK_TIMEOUT_SECS, QUOTE_CACHE_TTL_SECS,
    QUOTE_TIMEOUT_SECS, SNAPSHOT_CACHE_TTL_SECS, SNAPSHOT_CONTRACT_LIMIT, SNAPSHOT_TIMEOUT_SECS,
};
use crate::error::Result;
use crate::types::{ContractRecord, ContractType, DailyQuote};

use super::cache::TtlCache;
use super::MarketData;

/// reqwest-backed gateway over the options-snapshot, previous-day-quote and
/// IV-rank endpoints. Normalizes provider JSON into typed records and maps
/// every failure mode to an absence of data. Each fetch kind sits behind its
/// own TTL cache, so repeated scans inside a freshness window reuse responses
/// instead of re-hitting the providers.
pub struct HttpGateway {
    client: reqwest::Client,
    polygon_api_url: String,
    polygon_api_key: String,
    orats_api_url: String,
    orats_api_token: String,
    quotes: TtlCache<DailyQuote>,
    iv_ranks: TtlCache<f64>,
    snapshots: TtlCache<Vec<ContractRecord>>,
}

impl HttpGateway {
    /// Timeouts are per request (the snapshot payload gets a longer budget),
    /// so the shared client carries no global timeout.
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            polygon_api_url: cfg.polygon_api_url.clone(),
            polygon_api_key: cfg.polygon_api_key.clone(),
            orats_api_url: cfg.orats_api_url.clone(),
            orats_api_token: cfg.orats_api_token.clone(),
            quotes: TtlCache::new(Duration::from_secs(QUOTE_CACHE_TTL_SECS)),
            iv_ranks: TtlCache::new(Duration::from_secs(IV_RANK_CACHE_TTL_SECS)),
            snapshots: TtlCache::new(Duration::from_secs(SNAPSHOT_CACHE_TTL_SECS)),
        })
    }

    /// GET with query params and a bounded timeout, parsed as JSON. Transport
    /// errors and non-200 statuses collapse to None.
    async fn get_json(&self, url: &str, query: &[(&str, &str)], timeout_secs: u64) -> Option<Value> {
        let resp = match self
            .client
            .get(url)
            .query(query)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("[GATEWAY] request failed for {url}: {e}");
                return None;
            }
        };

        if resp.status() != reqwest::StatusCode::OK {
            debug!("[GATEWAY] non-200 ({}) from {url}", resp.status());
            return None;
        }

        match resp.json::<Value>().await {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("[GATEWAY] JSON parse failed for {url}: {e}");
                None
            }
        }
    }

    async fn fetch_daily_quote(&self, ticker: &str) -> Option<DailyQuote> {
        let url = format!("{}/v2/aggs/ticker/{}/prev", self.polygon_api_url, ticker);
        let body = self
            .get_json(&url, &[("apiKey", self.polygon_api_key.as_str())], QUOTE_TIMEOUT_SECS)
            .await?;

        let bar = body
            .get("results")
            .and_then(|r| r.as_array())
            .and_then(|a| a.first())?;
        let close = bar.get("c").and_then(json_f64)?;
        let volume = bar.get("v").and_then(json_f64).unwrap_or(0.0) as u64;
        Some(DailyQuote { close, volume })
    }

    async fn fetch_iv_rank(&self, ticker: &str) -> Option<f64> {
        let url = format!("{}/datav2/hist/ivrank", self.orats_api_url);
        let body = self
            .get_json(
                &url,
                &[("ticker", ticker), ("token", self.orats_api_token.as_str())],
                IV_RANK_TIMEOUT_SECS,
            )
            .await?;

        body.get("data")
            .and_then(|d| d.as_array())
            .and_then(|a| a.first())
            .and_then(|row| row.get("ivRank"))
            .and_then(json_f64)
    }

    /// A response without a "results" array still counts as a successful
    /// (empty) snapshot and is cached as such; only transport-level failure
    /// yields None here.
    async fn fetch_snapshot(&self, ticker: &str) -> Option<Vec<ContractRecord>> {
        let url = format!("{}/v3/snapshot/options/{}", self.polygon_api_url, ticker);
        let limit = SNAPSHOT_CONTRACT_LIMIT.to_string();
        let body = self
            .get_json(
                &url,
                &[("limit", limit.as_str()), ("apiKey", self.polygon_api_key.as_str())],
                SNAPSHOT_TIMEOUT_SECS,
            )
            .await?;

        let contracts: Vec<ContractRecord> = body
            .get("results")
            .and_then(|r| r.as_array())
            .map(|items| items.iter().filter_map(parse_contract).collect())
            .unwrap_or_default();
        debug!("[GATEWAY] {ticker}: snapshot with {} contracts", contracts.len());
        Some(contracts)
    }
}

#[async_trait]
impl MarketData for HttpGateway {
    async fn daily_quote(&self, ticker: &str) -> Option<DailyQuote> {
        self.quotes
            .get_or_fetch(ticker, || self.fetch_daily_quote(ticker))
            .await
    }

    async fn iv_rank(&self, ticker: &str) -> Option<f64> {
        self.iv_ranks
            .get_or_fetch(ticker, || self.fetch_iv_rank(ticker))
            .await
    }

    async fn options_snapshot(&self, ticker: &str) -> Vec<ContractRecord> {
        self.snapshots
            .get_or_fetch(ticker, || self.fetch_snapshot(ticker))
            .await
            .unwrap_or_default()
    }
}

/// Parse one snapshot record. Contracts that are neither calls nor puts are
/// dropped; missing numeric fields default to zero rather than rejecting the
/// contract.
fn parse_contract(v: &Value) -> Option<ContractRecord> {
    let details = v.get("details")?;
    let contract_type = details
        .get("contract_type")
        .and_then(|t| t.as_str())
        .and_then(parse_contract_type)?;
    let strike = details.get("strike_price").and_then(json_f64).unwrap_or(0.0);
    let expiry = details
        .get("expiration_date")
        .and_then(|e| e.as_str())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    let volume = v
        .get("day")
        .and_then(|d| d.get("volume"))
        .and_then(json_f64)
        .unwrap_or(0.0) as u64;
    let open_interest = v.get("open_interest").and_then(json_f64).unwrap_or(0.0) as u64;
    let implied_volatility = v.get("implied_volatility").and_then(json_f64).unwrap_or(0.0);

    Some(ContractRecord {
        contract_type,
        strike,
        expiry,
        volume,
        open_interest,
        implied_volatility,
    })
}

fn parse_contract_type(s: &str) -> Option<ContractType> {
    match s.to_lowercase().as_str() {
        "call" => Some(ContractType::Call),
        "put" => Some(ContractType::Put),
        _ => None,
    }
}

/// Accept numbers some providers encode as JSON strings.
fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_complete_contract() {
        let v = json!({
            "details": {
                "contract_type": "call",
                "strike_price": 180.0,
                "expiration_date": "2025-07-18"
            },
            "day": { "volume": 1250 },
            "open_interest": 4300,
            "implied_volatility": 0.6234
        });

        let contract = parse_contract(&v).unwrap();
        assert_eq!(contract.contract_type, ContractType::Call);
        assert_eq!(contract.strike, 180.0);
        assert_eq!(contract.expiry, NaiveDate::from_ymd_opt(2025, 7, 18));
        assert_eq!(contract.volume, 1250);
        assert_eq!(contract.open_interest, 4300);
        assert!((contract.implied_volatility - 0.6234).abs() < 1e-9);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let v = json!({
            "details": { "contract_type": "put" }
        });

        let contract = parse_contract(&v).unwrap();
        assert_eq!(contract.contract_type, ContractType::Put);
        assert_eq!(contract.strike, 0.0);
        assert_eq!(contract.expiry, None);
        assert_eq!(contract.volume, 0);
        assert_eq!(contract.open_interest, 0);
        assert_eq!(contract.implied_volatility, 0.0);
    }

    #[test]
    fn non_call_put_contracts_are_dropped() {
        let v = json!({
            "details": { "contract_type": "other", "strike_price": 100.0 }
        });
        assert!(parse_contract(&v).is_none());

        let v = json!({ "day": { "volume": 10 } });
        assert!(parse_contract(&v).is_none());
    }

    #[test]
    fn accepts_stringified_numbers() {
        let v = json!({
            "details": { "contract_type": "CALL", "strike_price": "182.5" },
            "day": { "volume": "900" },
            "open_interest": "2100"
        });

        let contract = parse_contract(&v).unwrap();
        assert_eq!(contract.strike, 182.5);
        assert_eq!(contract.volume, 900);
        assert_eq!(contract.open_interest, 2100);
    }

    #[test]
    fn malformed_expiry_is_dropped_not_fatal() {
        let v = json!({
            "details": {
                "contract_type": "call",
                "strike_price": 50.0,
                "expiration_date": "not-a-date"
            }
        });

        let contract = parse_contract(&v).unwrap();
        assert_eq!(contract.expiry, None);
    }
}

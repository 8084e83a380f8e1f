use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use common::{Candle, CandleSeries, Error, MarketData, Result};

const BASE_URL: &str = "https://api.twelvedata.com";

/// REST client for the Twelve Data `time_series` endpoint.
///
/// Stateless between calls; every fetch asks for the full window again and
/// hands back a cleaned, ascending [`CandleSeries`].
pub struct TwelveDataClient {
    api_key: String,
    http: Client,
}

impl TwelveDataClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl MarketData for TwelveDataClient {
    async fn candles(&self, symbol: &str, interval: &str, count: usize) -> Result<CandleSeries> {
        let url = format!("{BASE_URL}/time_series");
        let count_str = count.to_string();
        let params = [
            ("symbol", symbol),
            ("interval", interval),
            ("outputsize", count_str.as_str()),
            ("format", "JSON"),
            ("order", "ASC"),
            ("apikey", self.api_key.as_str()),
        ];

        let resp = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::DataUnavailable {
                symbol: symbol.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let payload: TimeSeriesResponse = serde_json::from_str(&body)?;
        let Some(rows) = payload.values else {
            // Provider-side errors come back 200 with a message instead of values.
            return Err(Error::DataUnavailable {
                symbol: symbol.to_string(),
                reason: payload
                    .message
                    .unwrap_or_else(|| "response carried no values".to_string()),
            });
        };

        let mut candles = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_candle() {
                Some(candle) => candles.push(candle),
                None => warn!(pair = %symbol, "Dropping unparseable candle row"),
            }
        }

        debug!(pair = %symbol, bars = candles.len(), "Fetched candle series");
        Ok(CandleSeries::new(symbol, candles))
    }
}

// ─── Twelve Data response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    values: Option<Vec<BarRow>>,
    #[serde(default)]
    message: Option<String>,
}

/// One bar as Twelve Data serves it: every field is a string.
#[derive(Debug, Deserialize)]
struct BarRow {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
    /// Absent for FX symbols.
    #[serde(default)]
    volume: Option<String>,
}

impl BarRow {
    fn into_candle(self) -> Option<Candle> {
        let timestamp = NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%d %H:%M:%S")
            .ok()?
            .and_utc();
        Some(Candle {
            timestamp,
            open: self.open.parse().ok()?,
            high: self.high.parse().ok()?,
            low: self.low.parse().ok()?,
            close: self.close.parse().ok()?,
            volume: self
                .volume
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
        })
    }
}

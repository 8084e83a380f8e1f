use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC+volume bar as returned by the market-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// A candle with any non-finite field carries no usable information.
    pub fn is_usable(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}

/// Time-ascending candle history for one symbol.
///
/// The constructor drops unusable candles, sorts by timestamp and removes
/// duplicate timestamps, so consumers can rely on strictly increasing bars.
/// A series belongs to exactly one evaluation cycle and is never cached.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    symbol: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(symbol: impl Into<String>, mut candles: Vec<Candle>) -> Self {
        candles.retain(Candle::is_usable);
        candles.sort_by_key(|c| c.timestamp);
        candles.dedup_by_key(|c| c.timestamp);
        Self {
            symbol: symbol.into(),
            candles,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Close prices oldest-first, the input shape the indicator layer wants.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

/// Direction of a confirmed entry signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Buy,
    Sell,
    Neutral,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Buy => write!(f, "⬆️ Buy"),
            Verdict::Sell => write!(f, "⬇️ Sell"),
            Verdict::Neutral => write!(f, "⚖️ Neutral"),
        }
    }
}

/// Final verdict plus the audit rationale shown in the confirm message.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub verdict: Verdict,
    pub rationale: String,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.verdict, self.rationale)
    }
}

/// Advisory read sent in the prepare message, one delay ahead of the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    PossibleBuy,
    PossibleSell,
    AwaitSignal,
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::PossibleBuy => write!(f, "⏳ Possible buy setup (uptrend + low RSI)."),
            Hint::PossibleSell => write!(f, "⏳ Possible sell setup (downtrend + high RSI)."),
            Hint::AwaitSignal => write!(f, "⏳ Preparing: await signal on the next bar."),
        }
    }
}

/// Normalize a raw symbol token to `BASE/QUOTE` uppercase form.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase().replace('-', "/")
}

/// Parse a comma-separated pair list: normalize every token, drop tokens
/// without a `/`, de-duplicate preserving first occurrence. An input with
/// no valid token yields an empty list; callers decide what that means.
pub fn parse_pair_list(csv: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    csv.split(',')
        .map(normalize_symbol)
        .filter(|s| s.contains('/'))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

use async_trait::async_trait;

use crate::error::Result;
use crate::types::CandleSeries;

/// One inbound message pulled from the command channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Monotonic update id; the poll cursor advances past the highest id seen.
    pub id: i64,
    /// Chat id of the sender, checked against the authorized chat.
    pub sender: i64,
    pub text: String,
}

/// Outbound notification channel. Delivery is best-effort: callers log a
/// failed send and move on, they never escalate it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Inbound command channel with long-poll semantics.
///
/// Implementations return updates ordered by id. Delivery is at-least-once;
/// the caller owns the cursor and advances it past every id it has seen,
/// including messages it then drops.
#[async_trait]
pub trait CommandSource: Send + Sync {
    async fn poll(&self, cursor: Option<i64>) -> Result<Vec<InboundMessage>>;
}

/// Market-data provider returning the most recent `count` bars for a symbol
/// at a fixed interval, oldest first.
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn candles(&self, symbol: &str, interval: &str, count: usize) -> Result<CandleSeries>;
}

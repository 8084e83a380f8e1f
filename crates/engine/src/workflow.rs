use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use common::{CandleSeries, Decision, MarketData, Notifier};
use signal::{final_verdict, latest_snapshots, prepare_hint};

/// Knobs for one evaluation cycle.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub bar_interval: String,
    pub fetch_count: usize,
    /// Series shorter than this count as unavailable data.
    pub min_series_len: usize,
    /// Wall-clock gap between the prepare message and the confirm fetch.
    pub confirm_delay: Duration,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            bar_interval: "1min".to_string(),
            fetch_count: 120,
            min_series_len: 60,
            confirm_delay: Duration::from_secs(60),
        }
    }
}

/// How one evaluation cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Both messages went out; carries the confirmed decision.
    Confirmed(Decision),
    /// The first fetch produced no usable series; warned and gave up.
    DataUnavailable,
    /// The refresh after the delay failed; the prepare hint stands alone.
    RefreshUnavailable,
}

/// Two-phase evaluation of a single pair: fetch, send a prepare hint, hold
/// for the confirm delay, refetch, send the verdict.
///
/// Each call to [`run_cycle`](Self::run_cycle) is one self-contained cycle;
/// no state survives it. Calls serialize on an internal gate, so two
/// evaluations never interleave no matter whether a sweep or a direct
/// `/pair` command asked for them.
pub struct PairWorkflow {
    market: Arc<dyn MarketData>,
    notifier: Arc<dyn Notifier>,
    settings: WorkflowSettings,
    eval_gate: Mutex<()>,
}

impl PairWorkflow {
    pub fn new(
        market: Arc<dyn MarketData>,
        notifier: Arc<dyn Notifier>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            market,
            notifier,
            settings,
            eval_gate: Mutex::new(()),
        }
    }

    /// One full prepare-then-confirm cycle for `symbol`.
    pub async fn run_cycle(&self, symbol: &str) -> CycleOutcome {
        let _eval = self.eval_gate.lock().await;

        let Some(series) = self.usable_series(symbol).await else {
            self.notify(&format!("⚠️ {symbol}: market data unavailable right now."))
                .await;
            return CycleOutcome::DataUnavailable;
        };
        let Some((_, last)) = latest_snapshots(&series) else {
            self.notify(&format!("⚠️ {symbol}: market data unavailable right now."))
                .await;
            return CycleOutcome::DataUnavailable;
        };

        let hint = prepare_hint(&last);
        let delay_secs = self.settings.confirm_delay.as_secs();
        self.notify(&format!(
            "🔔 {symbol}\n⏰ {}\nLast price: {}\n{hint}\n(entry signal in {delay_secs}s)",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            last.close,
        ))
        .await;

        tokio::time::sleep(self.settings.confirm_delay).await;

        // Fresh fetch after the delay; the verdict must see the newest bar.
        let refreshed = match self.usable_series(symbol).await {
            Some(series) => series,
            None => {
                self.notify(&format!("⚠️ {symbol}: could not refresh candles after the delay."))
                    .await;
                return CycleOutcome::RefreshUnavailable;
            }
        };
        let Some((prev, last)) = latest_snapshots(&refreshed) else {
            self.notify(&format!("⚠️ {symbol}: could not refresh candles after the delay."))
                .await;
            return CycleOutcome::RefreshUnavailable;
        };

        let decision = final_verdict(&last, &prev);
        info!(pair = %symbol, verdict = %decision.verdict, "Cycle confirmed");
        self.notify(&format!(
            "✅ {symbol} — entry signal\n⏰ {}\nLast price: {}\n{decision}",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            last.close,
        ))
        .await;

        CycleOutcome::Confirmed(decision)
    }

    /// Fetch and keep only series long enough for a meaningful readout.
    async fn usable_series(&self, symbol: &str) -> Option<CandleSeries> {
        let fetched = self
            .market
            .candles(symbol, &self.settings.bar_interval, self.settings.fetch_count)
            .await;
        match fetched {
            Ok(series) if series.len() >= self.settings.min_series_len => Some(series),
            Ok(series) => {
                warn!(
                    pair = %symbol,
                    bars = series.len(),
                    min = self.settings.min_series_len,
                    "Series too short to evaluate"
                );
                None
            }
            Err(e) => {
                warn!(pair = %symbol, error = %e, "Candle fetch failed");
                None
            }
        }
    }

    /// Best-effort send; a failed notification never aborts the cycle.
    async fn notify(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            warn!(error = %e, "Notification send failed");
        }
    }
}

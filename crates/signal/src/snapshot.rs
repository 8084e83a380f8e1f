use common::CandleSeries;

use crate::indicators::{bollinger, ema, rsi};

/// Span of the fast trend average.
pub const FAST_TREND_SPAN: usize = 20;
/// Span of the slow trend average.
pub const SLOW_TREND_SPAN: usize = 50;
/// Look-back of the momentum oscillator.
pub const MOMENTUM_PERIOD: usize = 14;
/// Window of the volatility envelope.
pub const BAND_PERIOD: usize = 20;
/// Envelope width in standard deviations.
pub const BAND_WIDTH: f64 = 2.0;
/// Momentum substituted while the oscillator window has produced no value.
/// A deliberate policy constant: 50 reads as "no momentum either way".
pub const NEUTRAL_MOMENTUM: f64 = 50.0;

/// Fully defined per-bar indicator readout consumed by the decision rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub fast_trend: f64,
    pub slow_trend: f64,
    pub momentum: f64,
    pub mid_band: f64,
    pub upper_band: f64,
    pub lower_band: f64,
}

/// Compute all indicator columns over the series and assemble snapshots for
/// the last two bars, `(prev, last)`.
///
/// Returns `None` while the envelope is still warming up on either bar.
/// The workflow's minimum-length gate keeps production series well past
/// warm-up; short series simply yield `None` instead of panicking.
pub fn latest_snapshots(series: &CandleSeries) -> Option<(IndicatorSnapshot, IndicatorSnapshot)> {
    let closes = series.closes();
    if closes.len() < 2 {
        return None;
    }

    let fast = ema(&closes, FAST_TREND_SPAN);
    let slow = ema(&closes, SLOW_TREND_SPAN);
    let momentum = rsi(&closes, MOMENTUM_PERIOD);
    let bands = bollinger(&closes, BAND_PERIOD, BAND_WIDTH);

    let snapshot_at = |i: usize| -> Option<IndicatorSnapshot> {
        Some(IndicatorSnapshot {
            close: closes[i],
            fast_trend: fast[i],
            slow_trend: slow[i],
            momentum: momentum[i].unwrap_or(NEUTRAL_MOMENTUM),
            mid_band: bands.mid[i]?,
            upper_band: bands.upper[i]?,
            lower_band: bands.lower[i]?,
        })
    };

    let last = snapshot_at(closes.len() - 1)?;
    let prev = snapshot_at(closes.len() - 2)?;
    Some((prev, last))
}

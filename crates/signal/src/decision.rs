use common::{Decision, Hint, Verdict};

use crate::snapshot::IndicatorSnapshot;

/// Momentum at or below this reads as a pullback worth watching.
const HINT_OVERSOLD: f64 = 40.0;
/// Momentum at or above this reads as an overshoot worth watching.
const HINT_OVERBOUGHT: f64 = 60.0;
/// Midline separating bullish from bearish momentum in the final rules.
const MOMENTUM_MIDLINE: f64 = 50.0;

/// Advisory read of the latest bar, sent one delay ahead of the verdict.
pub fn prepare_hint(last: &IndicatorSnapshot) -> Hint {
    if last.fast_trend > last.slow_trend && last.momentum <= HINT_OVERSOLD {
        Hint::PossibleBuy
    } else if last.fast_trend < last.slow_trend && last.momentum >= HINT_OVERBOUGHT {
        Hint::PossibleSell
    } else {
        Hint::AwaitSignal
    }
}

/// Binding verdict from the last two bars.
///
/// Buy wants an uptrend with cool momentum plus either a touch of the lower
/// band or a close above a rising mid band; Sell mirrors it on the other
/// side. Equal trend averages enter neither branch. Pure function of its
/// inputs, so the same bars always yield the same decision.
pub fn final_verdict(last: &IndicatorSnapshot, prev: &IndicatorSnapshot) -> Decision {
    let verdict = if last.fast_trend > last.slow_trend
        && last.momentum < MOMENTUM_MIDLINE
        && (last.close <= last.lower_band
            || (last.close > last.mid_band && last.mid_band > prev.mid_band))
    {
        Verdict::Buy
    } else if last.fast_trend < last.slow_trend
        && last.momentum > MOMENTUM_MIDLINE
        && (last.close >= last.upper_band
            || (last.close < last.mid_band && last.mid_band < prev.mid_band))
    {
        Verdict::Sell
    } else {
        Verdict::Neutral
    };

    let relation = if last.fast_trend > last.slow_trend { '>' } else { '<' };
    Decision {
        verdict,
        rationale: format!("RSI={:.1} | EMA20{}EMA50", last.momentum, relation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(close: f64, fast: f64, slow: f64, momentum: f64, mid: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            close,
            fast_trend: fast,
            slow_trend: slow,
            momentum,
            mid_band: mid,
            upper_band: mid + 0.02,
            lower_band: mid - 0.02,
        }
    }

    #[test]
    fn uptrend_pullback_to_lower_band_is_buy() {
        let prev = snap(1.10, 1.12, 1.10, 48.0, 1.11);
        let last = snap(1.08, 1.12, 1.10, 42.0, 1.11); // at/below 1.09 lower band
        let decision = final_verdict(&last, &prev);
        assert_eq!(decision.verdict, Verdict::Buy);
        assert_eq!(decision.rationale, "RSI=42.0 | EMA20>EMA50");
    }

    #[test]
    fn uptrend_close_above_rising_mid_is_buy() {
        let prev = snap(1.10, 1.12, 1.10, 48.0, 1.10);
        let last = snap(1.14, 1.12, 1.10, 48.0, 1.11);
        assert_eq!(final_verdict(&last, &prev).verdict, Verdict::Buy);
    }

    #[test]
    fn downtrend_overshoot_to_upper_band_is_sell() {
        let prev = snap(1.12, 1.10, 1.12, 55.0, 1.11);
        let last = snap(1.14, 1.10, 1.12, 58.0, 1.11); // at/above 1.13 upper band
        let decision = final_verdict(&last, &prev);
        assert_eq!(decision.verdict, Verdict::Sell);
        assert_eq!(decision.rationale, "RSI=58.0 | EMA20<EMA50");
    }

    #[test]
    fn downtrend_close_below_falling_mid_is_sell() {
        let prev = snap(1.12, 1.10, 1.12, 58.0, 1.12);
        let last = snap(1.095, 1.10, 1.12, 58.0, 1.11);
        assert_eq!(final_verdict(&last, &prev).verdict, Verdict::Sell);
    }

    #[test]
    fn equal_trend_averages_are_neutral() {
        let prev = snap(1.10, 1.11, 1.11, 42.0, 1.11);
        let last = snap(1.08, 1.11, 1.11, 42.0, 1.11);
        assert_eq!(final_verdict(&last, &prev).verdict, Verdict::Neutral);
    }

    #[test]
    fn hot_momentum_blocks_a_buy() {
        let prev = snap(1.10, 1.12, 1.10, 55.0, 1.11);
        let last = snap(1.08, 1.12, 1.10, 55.0, 1.11);
        assert_eq!(final_verdict(&last, &prev).verdict, Verdict::Neutral);
    }

    #[test]
    fn same_bars_always_yield_the_same_decision() {
        let prev = snap(1.10, 1.12, 1.10, 48.0, 1.10);
        let last = snap(1.14, 1.12, 1.10, 48.0, 1.11);
        assert_eq!(final_verdict(&last, &prev), final_verdict(&last, &prev));
    }

    #[test]
    fn oversold_uptrend_hints_a_buy_setup() {
        assert_eq!(prepare_hint(&snap(1.1, 1.12, 1.10, 40.0, 1.11)), Hint::PossibleBuy);
    }

    #[test]
    fn overbought_downtrend_hints_a_sell_setup() {
        assert_eq!(prepare_hint(&snap(1.1, 1.10, 1.12, 60.0, 1.11)), Hint::PossibleSell);
    }

    #[test]
    fn anything_else_awaits_the_next_bar() {
        assert_eq!(prepare_hint(&snap(1.1, 1.12, 1.10, 50.0, 1.11)), Hint::AwaitSignal);
        assert_eq!(prepare_hint(&snap(1.1, 1.11, 1.11, 30.0, 1.11)), Hint::AwaitSignal);
    }
}

/// Relative Strength Index over simple rolling means of gains and losses.
///
/// Undefined (`None`) until a full trailing window of `period` deltas
/// exists. A window with zero average loss but positive average gain
/// saturates to 100. A window where nothing moved at all has no meaningful
/// momentum and stays `None`; the snapshot layer substitutes the neutral
/// default there.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "RSI period must be >= 1");

    let mut out = vec![None; closes.len()];
    if closes.len() <= period {
        return out;
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    for i in period..closes.len() {
        let window = i - period..i;
        let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[window].iter().sum::<f64>() / period as f64;
        out[i] = if avg_loss == 0.0 {
            (avg_gain > 0.0).then_some(100.0)
        } else {
            Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
        };
    }
    out
}

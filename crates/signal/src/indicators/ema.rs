/// Exponential moving average over a close series, oldest first.
///
/// Seeded with the first value and smoothed with `alpha = 2 / (span + 1)`,
/// so every output index is defined from bar zero on.
pub fn ema(closes: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");

    let mut out = Vec::with_capacity(closes.len());
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut current = match closes.first() {
        Some(&first) => first,
        None => return out,
    };
    out.push(current);
    for &close in &closes[1..] {
        current = alpha * close + (1.0 - alpha) * current;
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(ema(&[], 20).is_empty());
    }

    #[test]
    fn flat_series_stays_at_the_price() {
        let out = ema(&[1.1; 50], 20);
        assert_eq!(out.len(), 50);
        for value in out {
            assert!((value - 1.1).abs() < 1e-12);
        }
    }

    #[test]
    fn seeds_with_the_first_value() {
        let out = ema(&[3.0, 4.0], 9);
        assert_eq!(out[0], 3.0);
        // alpha = 0.2, so 0.2 * 4 + 0.8 * 3 = 3.2
        assert!((out[1] - 3.2).abs() < 1e-12);
    }

    #[test]
    fn shorter_span_tracks_a_rising_series_faster() {
        let closes: Vec<f64> = (0..100).map(|i| 1.0 + i as f64 * 0.01).collect();
        let fast = ema(&closes, 20);
        let slow = ema(&closes, 50);
        assert!(fast.last().unwrap() > slow.last().unwrap());
        assert!(fast.last().unwrap() < closes.last().unwrap());
    }
}

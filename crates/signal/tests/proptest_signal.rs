use chrono::{Duration, TimeZone, Utc};
use common::{Candle, CandleSeries, Verdict};
use proptest::prelude::*;
use signal::{final_verdict, latest_snapshots, NEUTRAL_MOMENTUM};

fn series_from(prices: &[f64]) -> CandleSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let candles = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| Candle {
            timestamp: start + Duration::minutes(i as i64),
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 0.0,
        })
        .collect();
    CandleSeries::new("EUR/USD", candles)
}

proptest! {
    /// A flat market of any price and length past warm-up always reads
    /// neutral: both trend averages sit on the price, momentum falls back
    /// to the neutral default and the verdict is Neutral.
    #[test]
    fn flat_series_is_always_neutral(
        price in 0.0001f64..10_000.0f64,
        bars in 50usize..300,
    ) {
        let series = series_from(&vec![price; bars]);
        let (prev, last) = latest_snapshots(&series).unwrap();
        prop_assert!((last.fast_trend - price).abs() / price < 1e-9);
        prop_assert!((last.slow_trend - price).abs() / price < 1e-9);
        prop_assert_eq!(last.momentum, NEUTRAL_MOMENTUM);
        prop_assert_eq!(final_verdict(&last, &prev).verdict, Verdict::Neutral);
    }

    /// Snapshot assembly on arbitrary finite price paths never panics,
    /// momentum stays inside [0, 100], the envelope stays ordered and the
    /// verdict is deterministic.
    #[test]
    fn random_price_paths_stay_well_formed(
        prices in prop::collection::vec(0.0001f64..10_000.0f64, 60..200),
    ) {
        let series = series_from(&prices);
        let (prev, last) = latest_snapshots(&series).unwrap();
        prop_assert!((0.0..=100.0).contains(&last.momentum));
        prop_assert!((0.0..=100.0).contains(&prev.momentum));
        prop_assert!(last.lower_band <= last.mid_band);
        prop_assert!(last.mid_band <= last.upper_band);
        prop_assert_eq!(final_verdict(&last, &prev), final_verdict(&last, &prev));
    }
}

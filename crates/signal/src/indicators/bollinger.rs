/// Rolling mean/stddev envelope, one entry per input bar.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub mid: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Rolling mean ± `width` sample standard deviations over the trailing
/// `period` bars. Sample variance (n−1 divisor) matches the envelope the
/// decision rules were tuned against. Undefined until the window fills.
pub fn bollinger(closes: &[f64], period: usize, width: f64) -> BollingerBands {
    assert!(period >= 2, "Bollinger period must be >= 2");

    let n = closes.len();
    let mut bands = BollingerBands {
        mid: vec![None; n],
        upper: vec![None; n],
        lower: vec![None; n],
    };
    if n < period {
        return bands;
    }

    for i in (period - 1)..n {
        let window = &closes[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let var = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (period as f64 - 1.0);
        let dev = width * var.sqrt();
        bands.mid[i] = Some(mean);
        bands.upper[i] = Some(mean + dev);
        bands.lower[i] = Some(mean - dev);
    }
    bands
}

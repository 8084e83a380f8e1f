pub mod decision;
pub mod indicators;
pub mod snapshot;

pub use decision::{final_verdict, prepare_hint};
pub use indicators::{bollinger, ema, rsi, BollingerBands};
pub use snapshot::{latest_snapshots, IndicatorSnapshot, NEUTRAL_MOMENTUM};

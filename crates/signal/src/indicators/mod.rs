pub mod bollinger;
pub mod ema;
pub mod rsi;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use rsi::rsi;

pub mod config;
pub mod error;
pub mod gateway;
pub mod types;

pub use config::{Config, DEFAULT_PAIRS};
pub use error::{Error, Result};
pub use gateway::{CommandSource, InboundMessage, MarketData, Notifier};
pub use types::*;

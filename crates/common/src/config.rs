use crate::parse_pair_list;

/// Pair set scanned until the first `/setpairs` command replaces it.
pub const DEFAULT_PAIRS: &str = "EUR/USD,GBP/USD,USD/JPY,EUR/GBP,AUD/USD";

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_token: String,
    /// Chat allowed to issue commands; also receives every notification.
    pub telegram_chat_id: i64,

    // Market data
    pub twelvedata_api_key: String,
    pub bar_interval: String,
    pub fetch_output_size: usize,
    pub min_series_len: usize,

    // Scanning
    pub pairs: Vec<String>,
    pub confirm_delay_secs: u64,
    pub pair_cooldown_secs: u64,
    pub poll_cadence_secs: u64,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let telegram_chat_id = required_env("TELEGRAM_CHAT_ID")
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|_| panic!("TELEGRAM_CHAT_ID must be a numeric chat id"));

        let pairs = parse_pair_list(
            &optional_env("PAIRS").unwrap_or_else(|| DEFAULT_PAIRS.to_string()),
        );
        if pairs.is_empty() {
            panic!("PAIRS must contain at least one BASE/QUOTE symbol");
        }

        Config {
            telegram_token: required_env("TELEGRAM_TOKEN"),
            telegram_chat_id,
            twelvedata_api_key: required_env("TWELVEDATA_API_KEY"),
            bar_interval: optional_env("BAR_INTERVAL").unwrap_or_else(|| "1min".to_string()),
            fetch_output_size: parsed_or("FETCH_OUTPUT_SIZE", 120),
            min_series_len: parsed_or("MIN_SERIES_LEN", 60),
            pairs,
            confirm_delay_secs: parsed_or("CONFIRM_DELAY_SECS", 60),
            pair_cooldown_secs: parsed_or("PAIR_COOLDOWN_SECS", 2),
            poll_cadence_secs: parsed_or("POLL_CADENCE_SECS", 1),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    optional_env(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use common::{normalize_symbol, parse_pair_list, CommandSource, Notifier};

use crate::controller::ScanController;
use crate::workflow::PairWorkflow;

/// Reply sent for `/help`.
pub const HELP_TEXT: &str = "🤖 Bot commands:\n\
/start — wake the bot up\n\
/help — show this help\n\
/setpairs EUR/USD,GBP/USD — replace the watched pairs\n\
/startscan — start the automatic scan\n\
/stop — stop the automatic scan\n\
/pair EUR/USD — analyze one pair right now";

/// The closed set of operator commands.
///
/// Parsing happens exactly once per message and the first whitespace-limited
/// token must match a command name exactly (an `@botname` suffix is
/// stripped), so `/start` can never swallow `/startscan` the way prefix
/// matching would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// Normalized, de-duplicated, non-empty pair list.
    SetPairs(Vec<String>),
    StartScan,
    Stop,
    /// Normalized `BASE/QUOTE` symbol.
    Pair(String),
}

/// Why a message failed to parse into a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    MissingPairList,
    BadPairList,
    MissingSymbol,
    BadSymbol,
    Unknown,
}

impl CommandError {
    /// Reply text shown to the operator.
    pub fn reply(&self) -> &'static str {
        match self {
            CommandError::MissingPairList => "Usage: /setpairs EUR/USD,GBP/USD",
            CommandError::BadPairList => "Bad pair format. Example: /setpairs EUR/USD,GBP/USD",
            CommandError::MissingSymbol => "Usage: /pair EUR/USD",
            CommandError::BadSymbol => "Bad pair format. Example: /pair EUR/USD",
            CommandError::Unknown => "Unknown command. Try /help.",
        }
    }
}

impl Command {
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let text = text.trim();
        let (head, body) = match text.split_once(char::is_whitespace) {
            Some((head, body)) => (head, body.trim()),
            None => (text, ""),
        };
        let head = head.split('@').next().unwrap_or(head).to_ascii_lowercase();

        match head.as_str() {
            "/start" => Ok(Command::Start),
            "/help" => Ok(Command::Help),
            "/startscan" => Ok(Command::StartScan),
            "/stop" => Ok(Command::Stop),
            "/setpairs" => {
                if body.is_empty() {
                    return Err(CommandError::MissingPairList);
                }
                let pairs = parse_pair_list(body);
                if pairs.is_empty() {
                    return Err(CommandError::BadPairList);
                }
                Ok(Command::SetPairs(pairs))
            }
            "/pair" => {
                let raw = body
                    .split_whitespace()
                    .next()
                    .ok_or(CommandError::MissingSymbol)?;
                let symbol = normalize_symbol(raw);
                if !symbol.contains('/') {
                    return Err(CommandError::BadSymbol);
                }
                Ok(Command::Pair(symbol))
            }
            _ => Err(CommandError::Unknown),
        }
    }
}

/// Polls the command source, gates on the authorized sender and applies
/// commands against the scan state.
///
/// Only `/pair` does slow work: it runs the full evaluation cycle inline,
/// so later commands queue until the cycle ends. That keeps direct queries
/// strictly serialized with sweeps.
pub struct CommandLoop {
    source: Arc<dyn CommandSource>,
    notifier: Arc<dyn Notifier>,
    controller: Arc<ScanController>,
    workflow: Arc<PairWorkflow>,
    authorized_sender: i64,
    idle: Duration,
}

impl CommandLoop {
    pub fn new(
        source: Arc<dyn CommandSource>,
        notifier: Arc<dyn Notifier>,
        controller: Arc<ScanController>,
        workflow: Arc<PairWorkflow>,
        authorized_sender: i64,
        idle: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            controller,
            workflow,
            authorized_sender,
            idle,
        }
    }

    /// Run the polling loop forever. Call from `tokio::spawn`.
    pub async fn run(self) {
        info!(sender = self.authorized_sender, "Command loop running");
        let mut cursor: Option<i64> = None;

        loop {
            match self.source.poll(cursor).await {
                Ok(messages) => {
                    for message in messages {
                        // Advance past every update, even ones we drop, so
                        // nothing gets re-delivered forever.
                        cursor = Some(message.id + 1);

                        if message.sender != self.authorized_sender {
                            warn!(sender = message.sender, "Dropping message from unauthorized sender");
                            continue;
                        }

                        if let Some(reply) = self.handle(&message.text).await {
                            self.send(&reply).await;
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Command poll failed");
                }
            }

            tokio::time::sleep(self.idle).await;
        }
    }

    /// Apply one message; returns the reply text, if any.
    async fn handle(&self, text: &str) -> Option<String> {
        match Command::parse(text) {
            Ok(Command::Start) => {
                self.controller.stop_scan();
                Some("🚀 Bot is up. Use /help for commands.".to_string())
            }
            Ok(Command::Help) => Some(HELP_TEXT.to_string()),
            Ok(Command::SetPairs(pairs)) => {
                let listed = pairs.join(", ");
                self.controller.set_pairs(pairs);
                Some(format!("✅ Pairs set: {listed}"))
            }
            Ok(Command::StartScan) => {
                self.controller.start_scan();
                Some(format!(
                    "✅ Scan started. Pairs: {}",
                    self.controller.sweep_pairs().join(", ")
                ))
            }
            Ok(Command::Stop) => {
                self.controller.stop_scan();
                Some("⛔ Auto-scan stopped.".to_string())
            }
            Ok(Command::Pair(symbol)) => {
                // The cycle speaks through its own notifications.
                self.workflow.run_cycle(&symbol).await;
                None
            }
            Err(e) => Some(e.reply().to_string()),
        }
    }

    async fn send(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            warn!(error = %e, "Reply send failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_bare_command() {
        assert_eq!(Command::parse("/start"), Ok(Command::Start));
        assert_eq!(Command::parse("/help"), Ok(Command::Help));
        assert_eq!(Command::parse("/startscan"), Ok(Command::StartScan));
        assert_eq!(Command::parse("/stop"), Ok(Command::Stop));
    }

    #[test]
    fn startscan_is_not_swallowed_by_start() {
        // Prefix matching would dispatch this to /start.
        assert_eq!(Command::parse("/startscan"), Ok(Command::StartScan));
        assert_eq!(Command::parse("/start scan"), Ok(Command::Start));
    }

    #[test]
    fn strips_botname_suffix_and_ignores_case() {
        assert_eq!(Command::parse("/StartScan@fx_bot"), Ok(Command::StartScan));
        assert_eq!(Command::parse("/HELP"), Ok(Command::Help));
    }

    #[test]
    fn setpairs_normalizes_and_dedups() {
        assert_eq!(
            Command::parse("/setpairs eur-usd, gbp/usd, EUR/USD"),
            Ok(Command::SetPairs(vec![
                "EUR/USD".to_string(),
                "GBP/USD".to_string()
            ]))
        );
    }

    #[test]
    fn setpairs_rejects_missing_or_junk_lists() {
        assert_eq!(Command::parse("/setpairs"), Err(CommandError::MissingPairList));
        assert_eq!(Command::parse("/setpairs nonsense"), Err(CommandError::BadPairList));
    }

    #[test]
    fn pair_normalizes_its_symbol() {
        assert_eq!(Command::parse("/pair eur-usd"), Ok(Command::Pair("EUR/USD".to_string())));
    }

    #[test]
    fn pair_rejects_missing_or_bad_symbols() {
        assert_eq!(Command::parse("/pair"), Err(CommandError::MissingSymbol));
        assert_eq!(Command::parse("/pair nonsense"), Err(CommandError::BadSymbol));
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(Command::parse("/bogus"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("hello there"), Err(CommandError::Unknown));
        assert_eq!(Command::parse(""), Err(CommandError::Unknown));
    }
}

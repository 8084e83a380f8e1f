use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, MarketData, Notifier};
use engine::{CommandLoop, PairWorkflow, ScanController, Scanner, TwelveDataClient, WorkflowSettings};
use telegram_ctrl::TelegramChannel;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(pairs = ?cfg.pairs, chat_id = cfg.telegram_chat_id, "FxScout starting");

    // ── Collaborators ─────────────────────────────────────────────────────────
    let channel = Arc::new(TelegramChannel::new(
        cfg.telegram_token.clone(),
        cfg.telegram_chat_id,
    ));
    let notifier: Arc<dyn Notifier> = channel.clone();
    let market: Arc<dyn MarketData> = Arc::new(TwelveDataClient::new(cfg.twelvedata_api_key.clone()));

    // ── Core ──────────────────────────────────────────────────────────────────
    let controller = Arc::new(ScanController::new(cfg.pairs.clone()));
    let workflow = Arc::new(PairWorkflow::new(
        market,
        notifier.clone(),
        WorkflowSettings {
            bar_interval: cfg.bar_interval.clone(),
            fetch_count: cfg.fetch_output_size,
            min_series_len: cfg.min_series_len,
            confirm_delay: Duration::from_secs(cfg.confirm_delay_secs),
        },
    ));

    let scanner = Scanner::new(
        controller.clone(),
        workflow.clone(),
        Duration::from_secs(cfg.poll_cadence_secs),
        Duration::from_secs(cfg.pair_cooldown_secs),
    );
    let command_loop = CommandLoop::new(
        channel.clone(),
        notifier.clone(),
        controller,
        workflow,
        cfg.telegram_chat_id,
        Duration::from_secs(cfg.poll_cadence_secs),
    );

    // ── Spawn all tasks ───────────────────────────────────────────────────────
    if let Err(e) = notifier.send("✅ Bot started. Send /help for commands.").await {
        warn!(error = %e, "Startup notice failed");
    }
    tokio::spawn(scanner.run());
    tokio::spawn(command_loop.run());

    info!("All subsystems started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c().await.unwrap();
    info!("Shutdown signal received. Exiting.");
}

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::controller::ScanController;
use crate::workflow::PairWorkflow;

/// Drives automatic sweeps: every tick it re-reads the scan flag and, when
/// armed, runs one full workflow cycle per watched pair in pair-set order
/// with a cooldown between pairs.
///
/// The sweep runs on this task, not on spawned children, so a multi-minute
/// sweep is exactly as serialized as the workflow gate demands.
pub struct Scanner {
    controller: Arc<ScanController>,
    workflow: Arc<PairWorkflow>,
    cadence: Duration,
    cooldown: Duration,
}

impl Scanner {
    pub fn new(
        controller: Arc<ScanController>,
        workflow: Arc<PairWorkflow>,
        cadence: Duration,
        cooldown: Duration,
    ) -> Self {
        Self {
            controller,
            workflow,
            cadence,
            cooldown,
        }
    }

    /// Run the sweep loop forever. Call from `tokio::spawn`.
    pub async fn run(self) {
        info!(cadence = ?self.cadence, cooldown = ?self.cooldown, "Scanner running");
        let mut tick = tokio::time::interval(self.cadence);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tick.tick().await;
            if !self.controller.is_scanning() {
                continue;
            }

            // The sweep works off the pair set as of sweep start; commands
            // landing mid-sweep apply from the next sweep on.
            let pairs = self.controller.sweep_pairs();
            debug!(pairs = ?pairs, "Sweep starting");
            for (i, symbol) in pairs.iter().enumerate() {
                let outcome = self.workflow.run_cycle(symbol).await;
                debug!(pair = %symbol, outcome = ?outcome, "Sweep cycle finished");
                if i + 1 < pairs.len() {
                    tokio::time::sleep(self.cooldown).await;
                }
            }
        }
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Single owner of the mutable scan state: the watched pair set and the
/// auto-scan flag.
///
/// The two fields update independently and atomically; no invariant spans
/// them, so there is no outer lock. The sweep loop snapshots `sweep_pairs()`
/// once at sweep start and works off that copy, so `/setpairs` and `/stop`
/// issued mid-sweep take effect at the next sweep.
pub struct ScanController {
    pairs: RwLock<Vec<String>>,
    auto_scan: AtomicBool,
}

impl ScanController {
    /// Starts suspended; scanning begins only on an explicit `/startscan`.
    pub fn new(initial_pairs: Vec<String>) -> Self {
        Self {
            pairs: RwLock::new(initial_pairs),
            auto_scan: AtomicBool::new(false),
        }
    }

    pub fn start_scan(&self) {
        self.auto_scan.store(true, Ordering::SeqCst);
    }

    pub fn stop_scan(&self) {
        self.auto_scan.store(false, Ordering::SeqCst);
    }

    pub fn is_scanning(&self) -> bool {
        self.auto_scan.load(Ordering::SeqCst)
    }

    /// Replace the whole pair set in one assignment.
    pub fn set_pairs(&self, pairs: Vec<String>) {
        *self.pairs.write().unwrap() = pairs;
    }

    /// The pair set as of right now; the sweep-start view.
    pub fn sweep_pairs(&self) -> Vec<String> {
        self.pairs.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn starts_suspended() {
        let controller = ScanController::new(pairs(&["EUR/USD"]));
        assert!(!controller.is_scanning());
    }

    #[test]
    fn scan_flag_toggles() {
        let controller = ScanController::new(pairs(&["EUR/USD"]));
        controller.start_scan();
        assert!(controller.is_scanning());
        controller.stop_scan();
        assert!(!controller.is_scanning());
    }

    #[test]
    fn set_pairs_replaces_the_whole_set() {
        let controller = ScanController::new(pairs(&["EUR/USD", "GBP/USD"]));
        controller.set_pairs(pairs(&["USD/JPY"]));
        assert_eq!(controller.sweep_pairs(), pairs(&["USD/JPY"]));
    }

    #[test]
    fn sweep_snapshot_is_detached_from_later_updates() {
        let controller = ScanController::new(pairs(&["EUR/USD"]));
        let snapshot = controller.sweep_pairs();
        controller.set_pairs(pairs(&["USD/JPY"]));
        assert_eq!(snapshot, pairs(&["EUR/USD"]));
    }
}

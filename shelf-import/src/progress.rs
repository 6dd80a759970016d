//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called as each candidate is merged.
    fn on_candidate(&self, current: usize, total: usize, title: &str);

    /// Called when a phase starts (e.g., "Fetching spreadsheet").
    fn on_phase(&self, message: &str);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_candidate(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_candidate(&self, current: usize, total: usize, title: &str) {
        if current % 100 == 0 || current == total {
            log::info!("  [{}/{}] {}", current, total, title);
        } else {
            log::debug!("  [{}/{}] {}", current, total, title);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}

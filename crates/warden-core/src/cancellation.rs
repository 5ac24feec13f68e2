//! Cancellation support for scan operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation handle shared across scan workers.
///
/// Workers check `is_cancelled()` between files; a cancelled scan stops
/// early and surfaces `ScanError::Cancelled`. Rule evaluation is
/// cancellable only at whole-call granularity and does not consult this
/// handle.
#[derive(Debug, Clone)]
pub struct ScanCancellation {
    flag: Arc<AtomicBool>,
}

impl ScanCancellation {
    /// Create a new handle (not cancelled).
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Reset the flag for reuse across scans.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ScanCancellation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_across_clones() {
        let handle = ScanCancellation::new();
        let clone = handle.clone();
        assert!(!clone.is_cancelled());
        handle.cancel();
        assert!(clone.is_cancelled());
        handle.reset();
        assert!(!clone.is_cancelled());
    }
}

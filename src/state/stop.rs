use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop flag for a crawl run
///
/// Cloning the handle shares the flag. Raising it never interrupts a batch in
/// flight; the coordinator checks it before drawing the next batch.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the run to stop after the current batch
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let handle = StopHandle::new();
        let other = handle.clone();
        assert!(!other.is_stopped());

        handle.stop();
        assert!(other.is_stopped());
    }
}

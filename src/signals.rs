//! Cross-thread flags shared by the fetch tasks, the ticker and the UI loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide "keep running" flag. Cleared once, never set again.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Request from a background task for a full table redraw.
#[derive(Debug, Clone, Default)]
pub struct RedrawSignal(Arc<AtomicBool>);

impl RedrawSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Consumes a pending request.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Clears `running` when the process receives Ctrl-C.
///
/// The handler only flips the flag; the UI loop and the ticker notice it and
/// wind down on their own.
pub fn spawn_ctrl_c_handler(running: RunFlag) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Interrupt received, shutting down");
            running.stop();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_flag_clones_share_state() {
        let flag = RunFlag::new();
        let other = flag.clone();
        assert!(other.is_running());
        flag.stop();
        assert!(!other.is_running());
    }

    #[test]
    fn test_redraw_take_consumes_request() {
        let signal = RedrawSignal::new();
        assert!(!signal.take());

        signal.clone().request();
        assert!(signal.is_requested());
        assert!(signal.take());
        assert!(!signal.take());
    }
}

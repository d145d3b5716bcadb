use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Abort signal shared between whoever wants a scan stopped (Ctrl-C, a
/// dropped HTTP request) and the scan loop, which checks it once per tick.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag {
    raised: Arc<AtomicBool>,
}

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A flag shared between a decomposition and the code wishing to stop it.
///
/// Cancellation is cooperative: the decomposition checks the flag at each recursion step and
/// each merge candidate, and stops as soon as it observes it.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A new token, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the cancellation of every computation sharing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Was the cancellation requested?
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

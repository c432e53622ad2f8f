//! Cooperative cancellation for long-running searches.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Something a search can poll to learn that its consumer lost interest.
///
/// Searches check it before every type they visit; work already in flight completes, but no
/// new type scan begins once cancellation was requested.
pub trait Cancellable: Send + Sync {
    /// Returns `true` once cancellation has been requested
    fn is_cancelled(&self) -> bool;

    /// Requests cancellation
    fn cancel(&self);
}

/// Default cancellation token, cheap to clone and shared between the caller and a search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let shared = token.clone();
        assert!(!shared.is_cancelled());

        token.cancel();
        assert!(shared.is_cancelled());
    }

    #[test]
    fn test_cancel_across_threads() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}

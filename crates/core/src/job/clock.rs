//! Time source for the wait loop.

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Source of "now" and of delays between polls.
///
/// The tracker only measures elapsed time through this trait, so tests can
/// substitute a virtual clock and run timeout scenarios without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by tokio's timer.
///
/// Honors `tokio::time::pause`, so paused-time tests work with it as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio_util::task::TaskTracker;

use crate::http::{RequestExecutor, Transport};
use crate::shutdown::ShutdownCoordinator;

/// Shared count of dispatched requests across all chains.
#[derive(Debug, Clone, Default)]
pub struct RequestCounter {
    count: Arc<AtomicU64>,
}

impl RequestCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Run state handed to every worker: one transport, one counter, one
/// shutdown signal and the tracker owning fire-and-forget sends.
pub struct RunContext<T: Transport> {
    transport: Arc<T>,
    counter: RequestCounter,
    shutdown: ShutdownCoordinator,
    detached: TaskTracker,
}

impl<T: Transport> RunContext<T> {
    #[must_use]
    pub fn new(transport: Arc<T>, shutdown: ShutdownCoordinator) -> Self {
        Self {
            transport,
            counter: RequestCounter::new(),
            shutdown,
            detached: TaskTracker::new(),
        }
    }

    #[must_use]
    pub fn executor(&self) -> RequestExecutor<T> {
        RequestExecutor::new(
            Arc::clone(&self.transport),
            self.counter.clone(),
            self.detached.clone(),
        )
    }

    #[must_use]
    pub const fn counter(&self) -> &RequestCounter {
        &self.counter
    }

    #[must_use]
    pub const fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Fire-and-forget sends still running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.detached.len()
    }

    /// Stops accepting detached sends and waits up to `grace` for the ones
    /// already spawned. Returns `false` when some were still running.
    pub async fn drain_detached(&self, grace: Duration) -> bool {
        self.detached.close();
        tokio::time::timeout(grace, self.detached.wait())
            .await
            .is_ok()
    }
}

impl<T: Transport> Clone for RunContext<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            counter: self.counter.clone(),
            shutdown: self.shutdown.clone(),
            detached: self.detached.clone(),
        }
    }
}

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::debug;

use crate::chain::{Entry, EntryPosition};
use crate::error::HttpError;
use crate::supervisor::RequestCounter;

use super::Transport;

/// Issues one entry's request, synchronously or fire-and-forget.
pub struct RequestExecutor<T: Transport> {
    transport: Arc<T>,
    counter: RequestCounter,
    detached: TaskTracker,
}

impl<T: Transport> RequestExecutor<T> {
    #[must_use]
    pub const fn new(transport: Arc<T>, counter: RequestCounter, detached: TaskTracker) -> Self {
        Self {
            transport,
            counter,
            detached,
        }
    }

    /// Builds the request, counts it, and sends it.
    ///
    /// Awaited entries wait for the reply; others are handed to a task on
    /// the run's tracker whose transport errors are only logged.
    ///
    /// # Errors
    ///
    /// Returns `RequestFailed` when the request cannot be built, or when an
    /// awaited request fails at the transport level.
    pub async fn execute(&self, entry: &Entry, position: EntryPosition) -> Result<(), HttpError> {
        let request = self
            .transport
            .build(entry)
            .map_err(|err| HttpError::RequestFailed {
                position,
                source: Box::new(err),
            })?;
        self.counter.increment();

        if entry.wait_for_reply {
            let status = self.transport.send(request).await.map_err(|err| {
                HttpError::RequestFailed {
                    position,
                    source: Box::new(err),
                }
            })?;
            log_status(status, position);
            return Ok(());
        }

        let transport = Arc::clone(&self.transport);
        self.detached.spawn(async move {
            match transport.send(request).await {
                Ok(status) => log_status(status, position),
                Err(err) => debug!("Unawaited request at {} failed: {}", position, err),
            }
        });
        Ok(())
    }
}

fn log_status(status: u16, position: EntryPosition) {
    if !(200..300).contains(&status) {
        debug!("Request at {} returned status {}.", position, status);
    }
}

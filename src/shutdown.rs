use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// What fired the shutdown signal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
    Timeout,
    Requested,
    Completed,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Interrupt => "break",
            Self::Terminate => "process termination",
            Self::Timeout => "timeout",
            Self::Requested => "request",
            Self::Completed => "completion of all chains",
        };
        f.write_str(label)
    }
}

/// One-shot, process-wide cancellation signal shared by every worker.
///
/// Clones observe the same signal. Once signaled it stays signaled; only
/// the first reason is kept.
#[derive(Debug, Clone, Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
    reason: Arc<OnceLock<ShutdownReason>>,
}

impl ShutdownCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal. Returns `true` only for the call that fired it.
    pub fn signal(&self, reason: ShutdownReason) -> bool {
        let first = self.reason.set(reason).is_ok();
        self.token.cancel();
        if first {
            info!("shutting down by {}", reason);
        }
        first
    }

    #[must_use]
    pub fn is_signaled(&self) -> bool {
        self.token.is_cancelled()
    }

    #[must_use]
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.reason.get().copied()
    }

    /// Resolves once the signal has fired.
    pub async fn signaled(&self) {
        self.token.cancelled().await;
    }

    /// Fires `Timeout` after `limit` unless something else fires first.
    pub fn arm_deadline(&self, limit: Duration) -> JoinHandle<()> {
        let coordinator = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = coordinator.signaled() => {}
                () = tokio::time::sleep(limit) => {
                    coordinator.signal(ShutdownReason::Timeout);
                }
            }
        })
    }
}

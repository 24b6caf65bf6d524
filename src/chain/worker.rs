use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::task::yield_now;
use tokio::time::sleep;
use tracing::{debug, error, info, trace, warn};

use crate::http::{RequestExecutor, Transport};
use crate::shutdown::ShutdownCoordinator;
use crate::supervisor::RunContext;

use super::{Chain, EntryPosition, entry_delay};

/// Terminal state of a chain worker. While running, a worker alternates
/// between issuing a request and delaying; those phases are only traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Completed,
    Cancelled,
    Failed,
}

/// Terminal outcome of one chain worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    /// 1-based chain number.
    pub chain: usize,
    pub state: WorkerState,
    /// Passes that ran through every entry.
    pub passes: u64,
    /// Entry at which a cancelled or failed worker stopped.
    pub stopped_at: Option<EntryPosition>,
}

enum PassOutcome {
    Finished,
    Cancelled(EntryPosition),
    Failed(EntryPosition),
}

/// Runs one chain's entries in order, pass after pass, until the repeat
/// count is exhausted, an awaited request fails, or shutdown is observed at
/// an entry boundary.
pub struct ChainWorker<T: Transport> {
    index: usize,
    chain: Chain,
    executor: RequestExecutor<T>,
    shutdown: ShutdownCoordinator,
}

impl<T: Transport> ChainWorker<T> {
    #[must_use]
    pub fn new(index: usize, chain: Chain, context: &RunContext<T>) -> Self {
        Self {
            index,
            chain,
            executor: context.executor(),
            shutdown: context.shutdown().clone(),
        }
    }

    pub async fn run(self) -> ChainReport {
        if self.chain.entries.is_empty() {
            warn!("Chain {} has no entries; nothing to run.", self.index);
            return self.finish(WorkerState::Completed, 0, None);
        }

        debug!(
            "Chain {} started: {} entries, repeats: {}.",
            self.index,
            self.chain.entries.len(),
            self.chain.repeats
        );

        let mut rng = StdRng::from_entropy();
        let mut passes: u64 = 0;
        while self.chain.repeats.allows(passes) {
            let pass = passes.saturating_add(1);
            match self.run_pass(pass, &mut rng).await {
                PassOutcome::Finished => passes = pass,
                PassOutcome::Cancelled(position) => {
                    info!("Chain {} stopped by shutdown at {}.", self.index, position);
                    return self.finish(WorkerState::Cancelled, passes, Some(position));
                }
                PassOutcome::Failed(position) => {
                    return self.finish(WorkerState::Failed, passes, Some(position));
                }
            }
        }

        info!("Chain {} complete after {} passes.", self.index, passes);
        self.finish(WorkerState::Completed, passes, None)
    }

    async fn run_pass(&self, pass: u64, rng: &mut StdRng) -> PassOutcome {
        for (offset, entry) in self.chain.entries.iter().enumerate() {
            let position = EntryPosition {
                chain: self.index,
                pass,
                entry: offset.saturating_add(1),
            };

            if let Err(err) = self.executor.execute(entry, position).await {
                error!("Chain {} aborted: {}", self.index, err);
                return PassOutcome::Failed(position);
            }

            if let Some(delay) = entry_delay(entry, rng) {
                trace!("Chain {} sleeping {:?} after {}.", self.index, delay, position);
                sleep(delay).await;
            } else {
                // Unawaited entries without delay never suspend otherwise.
                yield_now().await;
            }

            if self.shutdown.is_signaled() {
                return PassOutcome::Cancelled(position);
            }
        }

        PassOutcome::Finished
    }

    fn finish(
        self,
        state: WorkerState,
        passes: u64,
        stopped_at: Option<EntryPosition>,
    ) -> ChainReport {
        ChainReport {
            chain: self.index,
            state,
            passes,
            stopped_at,
        }
    }
}

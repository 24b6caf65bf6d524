//! Launches one worker per chain, waits for all of them, and reports.
mod context;
mod report;


use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::chain::{Chain, ChainReport, ChainWorker};
use crate::error::{AppError, AppResult, ConfigError};
use crate::http::Transport;
use crate::shutdown::ShutdownCoordinator;

pub use context::{RequestCounter, RunContext};
pub use report::RunReport;

/// How long `wait` lets fire-and-forget sends finish once every chain ended.
pub const DETACHED_SEND_GRACE: Duration = Duration::from_secs(5);

pub struct Supervisor<T: Transport> {
    pending: Vec<Chain>,
    context: RunContext<T>,
    workers: JoinSet<ChainReport>,
    started: Option<Instant>,
}

impl<T: Transport> Supervisor<T> {
    /// Prepares a run over `chains`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationAbsent` when `chains` is empty.
    pub fn init(
        chains: Vec<Chain>,
        shutdown: ShutdownCoordinator,
        transport: Arc<T>,
    ) -> AppResult<Self> {
        if chains.is_empty() {
            return Err(AppError::config(ConfigError::ConfigurationAbsent));
        }
        Ok(Self {
            pending: chains,
            context: RunContext::new(transport, shutdown),
            workers: JoinSet::new(),
            started: None,
        })
    }

    /// Spawns one worker task per chain and returns without waiting.
    ///
    /// The start time is taken before the first spawn. Chains are handed
    /// over exactly once, so a second call launches nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run(&mut self) -> usize {
        let chains = std::mem::take(&mut self.pending);
        if chains.is_empty() {
            return 0;
        }
        self.started.get_or_insert_with(Instant::now);

        let launched = chains.len();
        for (offset, chain) in chains.into_iter().enumerate() {
            let worker = ChainWorker::new(offset.saturating_add(1), chain, &self.context);
            self.workers.spawn(worker.run());
        }
        info!("run: {} chains launched", launched);
        launched
    }

    /// Requests dispatched so far.
    #[must_use]
    pub fn requests(&self) -> u64 {
        self.context.counter().get()
    }

    /// Waits until every launched worker reached a terminal state, then
    /// gives outstanding fire-and-forget sends up to `DETACHED_SEND_GRACE`.
    pub async fn wait(mut self) -> RunReport {
        let mut chains = Vec::with_capacity(self.workers.len());
        let mut aborted: usize = 0;
        while let Some(joined) = self.workers.join_next().await {
            match joined {
                Ok(report) => chains.push(report),
                Err(err) => {
                    error!("Chain worker ended abnormally: {}", err);
                    aborted = aborted.saturating_add(1);
                }
            }
        }

        let elapsed = self
            .started
            .map(|started| started.elapsed())
            .unwrap_or_default();

        if !self.context.drain_detached(DETACHED_SEND_GRACE).await {
            warn!(
                "{} fire-and-forget requests still in flight after {:?}; abandoning them.",
                self.context.in_flight(),
                DETACHED_SEND_GRACE
            );
        }

        let report = RunReport::new(elapsed, self.context.counter().get(), chains, aborted);
        report.log();
        report
    }
}

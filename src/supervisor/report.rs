use std::time::Duration;

use tracing::info;

use crate::chain::{ChainReport, WorkerState};

/// Aggregate statistics for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub elapsed: Duration,
    pub total_requests: u64,
    pub completed: usize,
    pub cancelled: usize,
    /// Failed chains, including workers that ended abnormally.
    pub failed: usize,
    /// Per-chain outcomes ordered by chain number.
    pub chains: Vec<ChainReport>,
}

impl RunReport {
    pub(crate) fn new(
        elapsed: Duration,
        total_requests: u64,
        mut chains: Vec<ChainReport>,
        aborted: usize,
    ) -> Self {
        chains.sort_by_key(|report| report.chain);
        let count = |state: WorkerState| {
            chains
                .iter()
                .filter(|report| report.state == state)
                .count()
        };
        let completed = count(WorkerState::Completed);
        let cancelled = count(WorkerState::Cancelled);
        let failed = count(WorkerState::Failed).saturating_add(aborted);

        Self {
            elapsed,
            total_requests,
            completed,
            cancelled,
            failed,
            chains,
        }
    }

    #[must_use]
    pub const fn chain_count(&self) -> usize {
        self.completed
            .saturating_add(self.cancelled)
            .saturating_add(self.failed)
    }

    pub(crate) fn log(&self) {
        info!(
            "running time: {:?}, request number: {}",
            self.elapsed, self.total_requests
        );
    }

    pub fn print_summary(&self) {
        println!("Duration: {}", format_elapsed(self.elapsed));
        println!("Total Requests: {}", self.total_requests);
        println!(
            "Chains: {} (completed {}, cancelled {}, failed {})",
            self.chain_count(),
            self.completed,
            self.cancelled,
            self.failed
        );
        for report in &self.chains {
            match report.stopped_at {
                Some(position) => println!(
                    "  chain {}: {:?} after {} passes (stopped at {})",
                    report.chain, report.state, report.passes, position
                ),
                None => println!(
                    "  chain {}: {:?} after {} passes",
                    report.chain, report.state, report.passes
                ),
            }
        }
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
}

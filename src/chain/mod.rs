//! Chain data model and the per-chain worker loop.
mod delay;
mod types;
mod worker;


pub use delay::entry_delay;
pub use types::{Chain, Entry, EntryPosition, Repeats};
pub use worker::{ChainReport, ChainWorker, WorkerState};

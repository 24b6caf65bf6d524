use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

use reqwest::Method;

/// One HTTP call of a chain, normalized at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub url: String,
    pub method: Method,
    pub body: Option<String>,
    pub bearer_token: Option<String>,
    pub delay_min: Duration,
    pub delay_max: Duration,
    pub wait_for_reply: bool,
}

impl Entry {
    /// Creates a `GET` entry with no body, token or delay that does not wait
    /// for its reply.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            body: None,
            bearer_token: None,
            delay_min: Duration::ZERO,
            delay_max: Duration::ZERO,
            wait_for_reply: false,
        }
    }
}

/// How many full passes a chain makes through its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeats {
    Bounded(NonZeroU64),
    Unbounded,
}

impl Repeats {
    /// Zero is never a bounded count: it means "run until stopped".
    #[must_use]
    pub const fn from_count(count: u64) -> Self {
        match NonZeroU64::new(count) {
            Some(count) => Self::Bounded(count),
            None => Self::Unbounded,
        }
    }

    /// Returns whether another pass may start after `completed` passes.
    #[must_use]
    pub const fn allows(self, completed: u64) -> bool {
        match self {
            Self::Bounded(limit) => completed < limit.get(),
            Self::Unbounded => true,
        }
    }
}

impl fmt::Display for Repeats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(count) => write!(f, "{}", count),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Ordered entries plus the repeat policy, owned by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub entries: Vec<Entry>,
    pub repeats: Repeats,
}

/// Where an entry execution happened. All fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPosition {
    pub chain: usize,
    pub pass: u64,
    pub entry: usize,
}

impl fmt::Display for EntryPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chain {}, pass {}, entry {}",
            self.chain, self.pass, self.entry
        )
    }
}

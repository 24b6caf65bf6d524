use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::chain::Entry;
use crate::error::HttpError;

use super::Transport;

/// In-memory transport: records every built request by URL, fails sends to
/// the configured URLs, and counts sends that ran to completion.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    failing: Vec<String>,
    built: Mutex<Vec<String>>,
    sent: AtomicU64,
    delivered: AtomicU64,
    send_delay: Duration,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(urls: &[&str]) -> Self {
        Self {
            failing: urls.iter().map(|url| (*url).to_owned()).collect(),
            ..Self::default()
        }
    }

    /// Every send sleeps for `delay` before answering.
    pub(crate) fn with_send_delay(delay: Duration) -> Self {
        Self {
            send_delay: delay,
            ..Self::default()
        }
    }

    pub(crate) fn built(&self) -> Vec<String> {
        self.built
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    pub(crate) fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    type Request = String;

    fn build(&self, entry: &Entry) -> Result<String, HttpError> {
        if entry.url.is_empty() {
            return Err(HttpError::from("empty url"));
        }
        self.built
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.url.clone());
        Ok(entry.url.clone())
    }

    async fn send(&self, request: String) -> Result<u16, HttpError> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        if !self.send_delay.is_zero() {
            tokio::time::sleep(self.send_delay).await;
        }
        if self.failing.contains(&request) {
            return Err(HttpError::from("endpoint down"));
        }
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Ok(200)
    }
}

//! HTTP transport seam and the request executor.
mod client;
mod executor;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::chain::Entry;
use crate::error::HttpError;

pub use client::HttpTransport;
pub use executor::RequestExecutor;

/// Builds and sends the request for one entry.
///
/// `build` runs synchronously on the worker so a request counts as
/// dispatched the moment it exists; `send` may run on the worker or on a
/// detached task.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Request: Send + 'static;

    /// Constructs the request for `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry cannot be turned into a request.
    fn build(&self, entry: &Entry) -> Result<Self::Request, HttpError>;

    /// Sends a request and returns the response status code.
    ///
    /// # Errors
    ///
    /// Returns an error on transport-level failure. Non-2xx statuses are not
    /// errors.
    async fn send(&self, request: Self::Request) -> Result<u16, HttpError>;
}

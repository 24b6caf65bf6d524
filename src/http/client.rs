use async_trait::async_trait;
use reqwest::{Client, Request, Url};

use crate::chain::Entry;
use crate::error::{AppError, AppResult, HttpError};

use super::Transport;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("reqchain/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed transport sharing one connection pool across all chains.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the process-wide HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be initialized (e.g. the TLS
    /// backend fails to load).
    pub fn new() -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Request = Request;

    fn build(&self, entry: &Entry) -> Result<Request, HttpError> {
        let url = Url::parse(&entry.url).map_err(|err| HttpError::InvalidUrl {
            url: entry.url.clone(),
            source: err,
        })?;

        let mut builder = self.client.request(entry.method.clone(), url);
        if let Some(body) = entry.body.as_ref() {
            builder = builder.body(body.clone());
        }
        if let Some(token) = entry.bearer_token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        builder
            .build()
            .map_err(|err| HttpError::BuildRequestFailed { source: err })
    }

    async fn send(&self, request: Request) -> Result<u16, HttpError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| HttpError::Transport { source: err })?;
        Ok(response.status().as_u16())
    }
}

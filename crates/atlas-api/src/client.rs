// REST Countries HTTP client
//
// Wraps `reqwest::Client` with the directory's request policy: a single GET
// to a fixed endpoint, retried with backoff on transport failure. The body
// is returned as an untyped JSON document; shape and record validation
// belong to `atlas-core`.

use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, preview};
use crate::retry::{self, RetryPolicy};
use crate::transport::TransportConfig;

/// Raw HTTP client for the country data source.
pub struct CountriesClient {
    http: reqwest::Client,
    endpoint: Url,
    retry: RetryPolicy,
    timeout_secs: u64,
}

impl CountriesClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoint,
            retry: transport.retry,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// The data source URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the full country list as a JSON document.
    ///
    /// Transport failures (connect, timeout, body read, non-2xx status) are
    /// retried per the policy. A body that is not JSON is returned as
    /// `Error::Deserialization` without consuming a retry.
    pub async fn fetch_all(&self) -> Result<serde_json::Value, Error> {
        let body = retry::with_backoff(&self.retry, |attempt| self.get_once(attempt)).await?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body_preview: preview(&body),
        })
    }

    /// One GET, reading the whole body.
    async fn get_once(&self, attempt: u32) -> Result<String, Error> {
        debug!(attempt, url = %self.endpoint, "GET");

        let resp = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body_preview: preview(&body),
            });
        }

        let body = resp.text().await.map_err(|e| self.classify(e))?;
        trace!(bytes = body.len(), "response body read");
        Ok(body)
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

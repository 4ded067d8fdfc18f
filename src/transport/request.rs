//! One-shot HTTP exchange.
//!
//! # Responsibilities
//! - Perform exactly one request/response exchange per call
//! - Read and decode the entire response body
//! - Return every HTTP status as a result, including 4xx/5xx
//!
//! # Design Decisions
//! - One `reqwest::Client` per transport; connect timeout at client level
//! - Total deadline applied per one-shot request, never to streams
//! - Strict UTF-8 decode; a malformed body is a transport error

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method};

use crate::config::TimeoutConfig;
use crate::transport::error::TransportError;
use crate::transport::stream::LineStream;

/// HTTP transport bound to a set of deadlines.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    request_timeout: Option<Duration>,
    pull_timeout: Option<Duration>,
}

impl Transport {
    /// Create a transport from timeout configuration.
    ///
    /// A zero value disables the corresponding deadline.
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(connect) = nonzero_secs(timeouts.connect_secs) {
            builder = builder.connect_timeout(connect);
        }
        let client = builder
            .build()
            .expect("failed to construct HTTP client");

        Self {
            client,
            request_timeout: nonzero_secs(timeouts.request_secs),
            pull_timeout: nonzero_secs(timeouts.stream_pull_secs),
        }
    }

    /// Perform a single request and read the whole response.
    ///
    /// Returns the status code and the UTF-8 decoded body. Error statuses
    /// are returned normally; only connection, deadline and decode
    /// failures produce an `Err`.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<(u16, String), TransportError> {
        let mut builder = self.client.request(method, url).headers(headers.clone());
        if let Some(deadline) = self.request_timeout {
            builder = builder.timeout(deadline);
        }

        let response = builder.send().await.map_err(TransportError::from_send)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(TransportError::from_body)?;
        let body = std::str::from_utf8(&bytes)?.to_owned();

        tracing::debug!(%url, status, bytes = bytes.len(), "exchange complete");
        Ok((status, body))
    }

    /// Open a persistent response and expose it as a line stream.
    ///
    /// The status line and headers must arrive within the pull deadline;
    /// the body is consumed lazily through [`LineStream::next_line`].
    pub async fn stream(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<LineStream, TransportError> {
        let send = self.client.request(method, url).headers(headers.clone()).send();
        let response = match self.pull_timeout {
            Some(deadline) => tokio::time::timeout(deadline, send)
                .await
                .map_err(|_| TransportError::Timeout)?,
            None => send.await,
        }
        .map_err(TransportError::from_send)?;

        tracing::trace!(%url, status = response.status().as_u16(), "stream opened");
        Ok(LineStream::new(response, self.pull_timeout))
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(&TimeoutConfig::default())
    }
}

fn nonzero_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

//! API client binding configuration to the route table.
//!
//! # Responsibilities
//! - Hold the daemon base URL and auth headers
//! - Resolve symbolic operation names into transport calls
//! - Choose one-shot or streaming dispatch by the keep-alive flag
//!
//! # Design Decisions
//! - Stateless beyond configuration; clients can coexist against
//!   different daemons and share the route table
//! - The bearer header exists only when a secret was configured
//! - Every call re-issues a network exchange; no retry, no caching

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::api::error::ApiError;
use crate::api::routes::{render_path, Operation, PathArgs};
use crate::config::ControlConfig;
use crate::transport::{LineStream, Transport};

/// Client for one daemon's management API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    headers: HeaderMap,
    transport: Transport,
}

/// A fully read one-shot response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code, error statuses included.
    pub status: u16,
    /// UTF-8 decoded body.
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of resolving an operation by name: one-shot or streaming,
/// chosen by the route table.
#[derive(Debug)]
pub enum Exchange {
    /// Ordinary request/response operation.
    Response(ApiResponse),
    /// Keep-alive operation delivering lines as they arrive.
    Stream(LineStream),
}

impl ApiClient {
    /// Create a client for the daemon at `base_url`.
    ///
    /// When a secret is given, every request carries
    /// `Authorization: Bearer <secret>`.
    pub fn new(base_url: impl Into<String>, secret: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(secret) = secret {
            let value = HeaderValue::from_str(&format!("Bearer {secret}"))
                .map_err(|_| ApiError::InvalidSecret)?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            base_url,
            headers,
            transport: Transport::default(),
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &ControlConfig) -> Result<Self, ApiError> {
        let client = Self::new(config.api.base_url.clone(), config.api.secret.as_deref())?;
        Ok(client.with_transport(Transport::new(&config.timeouts)))
    }

    /// Replace the transport, e.g. to change deadlines.
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// The daemon base URL this client is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an operation by symbolic name and dispatch it.
    ///
    /// Keep-alive operations produce [`Exchange::Stream`]; everything
    /// else produces [`Exchange::Response`]. Unknown names fail with
    /// [`ApiError::UnknownOperation`] before any network I/O.
    pub async fn resolve(&self, name: &str, args: PathArgs<'_>) -> Result<Exchange, ApiError> {
        let operation = Operation::from_name(name)
            .ok_or_else(|| ApiError::UnknownOperation(name.to_owned()))?;

        if operation.is_keep_alive() {
            Ok(Exchange::Stream(self.open_stream(operation, args).await?))
        } else {
            Ok(Exchange::Response(self.call(operation, args).await?))
        }
    }

    /// Perform a one-shot operation.
    pub async fn call(
        &self,
        operation: Operation,
        args: PathArgs<'_>,
    ) -> Result<ApiResponse, ApiError> {
        if operation.is_keep_alive() {
            return Err(ApiError::Streaming(operation.name()));
        }

        let url = self.url_for(operation, args)?;
        tracing::debug!(operation = %operation, %url, "dispatching");

        let (status, body) = self
            .transport
            .request(operation.method(), &url, &self.headers)
            .await?;
        Ok(ApiResponse { status, body })
    }

    /// Open a keep-alive operation as a line stream.
    ///
    /// Each call opens a new connection; streams are not restartable.
    pub async fn open_stream(
        &self,
        operation: Operation,
        args: PathArgs<'_>,
    ) -> Result<LineStream, ApiError> {
        if !operation.is_keep_alive() {
            return Err(ApiError::NotStreaming(operation.name()));
        }

        let url = self.url_for(operation, args)?;
        tracing::debug!(operation = %operation, %url, "opening stream");

        Ok(self
            .transport
            .stream(operation.method(), &url, &self.headers)
            .await?)
    }

    /// Live traffic counters, one JSON object per line.
    pub async fn traffic(&self) -> Result<LineStream, ApiError> {
        self.open_stream(Operation::GetTraffic, &[]).await
    }

    /// Live daemon logs, one JSON object per line.
    pub async fn logs(&self) -> Result<LineStream, ApiError> {
        self.open_stream(Operation::GetLogs, &[]).await
    }

    /// All proxies and proxy groups.
    pub async fn proxies(&self) -> Result<ApiResponse, ApiError> {
        self.call(Operation::GetProxies, &[]).await
    }

    /// A single proxy by name.
    pub async fn proxy(&self, name: &str) -> Result<ApiResponse, ApiError> {
        self.call(Operation::GetProxy, &[("name", name)]).await
    }

    /// Select the active proxy inside the named group.
    pub async fn select_proxy(&self, name: &str) -> Result<ApiResponse, ApiError> {
        self.call(Operation::SetProxy, &[("name", name)]).await
    }

    /// Latency probe results for the named proxy.
    pub async fn proxy_delay(&self, name: &str) -> Result<ApiResponse, ApiError> {
        self.call(Operation::GetDelay, &[("name", name)]).await
    }

    /// The daemon's running configuration.
    pub async fn configs(&self) -> Result<ApiResponse, ApiError> {
        self.call(Operation::GetConfig, &[]).await
    }

    /// Ask the daemon to reload its configuration from disk.
    pub async fn reload_configs(&self) -> Result<ApiResponse, ApiError> {
        self.call(Operation::ReloadConfig, &[]).await
    }

    /// The active rule set.
    pub async fn rules(&self) -> Result<ApiResponse, ApiError> {
        self.call(Operation::GetRules, &[]).await
    }

    fn url_for(&self, operation: Operation, args: PathArgs<'_>) -> Result<String, ApiError> {
        Ok(format!("{}{}", self.base_url, render_path(operation, args)?))
    }
}

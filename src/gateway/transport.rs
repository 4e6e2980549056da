//! HTTP transport seam.
//!
//! Upstream calls go through the `Transport` trait so the dispatch and relay
//! logic can be exercised against a scripted double. The production
//! implementation is a thin wrapper over a single shared `reqwest::Client`
//! with HTTP/2 connection pooling.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};

use super::transform::OutboundRequest;

/// Transport-level error types
///
/// Only failures of the call itself live here. A non-2xx upstream status is
/// not a transport error; it comes back as a normal `UpstreamResponse` so
/// each relay can apply its own error-body rules.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// An upstream response: status plus a live byte stream.
///
/// The stream relay consumes the stream as it arrives; the buffered relays
/// collect it with [`UpstreamResponse::bytes`]. Dropping the value drops the
/// stream and releases the upstream connection.
pub struct UpstreamResponse {
    status: StatusCode,
    body: BoxStream<'static, Result<Bytes, TransportError>>,
}

impl std::fmt::Debug for UpstreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, body: BoxStream<'static, Result<Bytes, TransportError>>) -> Self {
        Self { status, body }
    }

    /// Build a response from an already-buffered payload.
    pub fn from_bytes(status: StatusCode, payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();
        Self {
            status,
            body: stream::once(async move { Ok(payload) }).boxed(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Consume the response, yielding the live byte stream.
    pub fn into_byte_stream(self) -> BoxStream<'static, Result<Bytes, TransportError>> {
        self.body
    }

    /// Collect the whole body into memory.
    pub async fn bytes(self) -> Result<Bytes, TransportError> {
        let mut body = self.body;
        let mut collected = Vec::new();
        while let Some(chunk) = body.next().await {
            collected.extend_from_slice(&chunk?);
        }
        Ok(Bytes::from(collected))
    }
}

/// Executes outbound requests.
///
/// Resolves as soon as upstream response headers arrive; the body is
/// consumed through the returned `UpstreamResponse`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: OutboundRequest,
        timeout: Option<Duration>,
    ) -> Result<UpstreamResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: OutboundRequest,
        timeout: Option<Duration>,
    ) -> Result<UpstreamResponse, TransportError> {
        let mut builder = self.client.post(&request.url);

        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes_stream().map(|chunk| chunk.map_err(map_reqwest_error));

        Ok(UpstreamResponse::new(status, body.boxed()))
    }
}

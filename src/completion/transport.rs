//! Pooled HTTP transport to the inference backend.
//!
//! # Responsibilities
//! - Own the process-wide connection pool (built once at startup)
//! - POST a JSON body with the correlation header
//! - Hand back status and raw body; interpretation belongs to the forwarder
//!
//! # Design Decisions
//! - `Transport` is a trait so the forwarder can be driven by a fake in tests
//! - The overall timeout is the only cancellation mechanism for backend calls
//! - The client never routes through an environment-configured proxy

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{StatusCode, header};
use thiserror::Error;

use crate::config::BackendConfig;
use crate::http::request::X_REQUEST_ID;

/// Errors raised before a backend status line is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("could not build HTTP client: {0}")]
    Client(String),

    /// The call did not complete within the configured timeout.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection refused, reset, DNS failure, TLS failure, or body read error.
    #[error("{0}")]
    Connection(String),
}

/// Raw backend reply.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// A way of delivering a JSON POST to the backend.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
        request_id: &str,
    ) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport with keep-alive connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Build the pooled client from backend settings.
    ///
    /// `reqwest` bounds idle connections per host only, so the effective
    /// cap is the smaller of the per-host and global limits. A gateway talks
    /// to exactly one backend host, which makes the two equivalent.
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let idle_per_host = config.max_idle_per_host.min(config.max_idle_connections);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.tls_handshake_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .pool_max_idle_per_host(idle_per_host)
            .no_proxy()
            .build()
            .map_err(|e| TransportError::Client(error_chain(&e)))?;

        tracing::debug!(
            timeout_secs = config.timeout_secs,
            idle_per_host,
            idle_timeout_secs = config.idle_timeout_secs,
            "Backend connection pool configured"
        );

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout_secs)
        } else {
            TransportError::Connection(error_chain(&e))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
        request_id: &str,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(X_REQUEST_ID, request_id)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse { status, body })
    }
}

/// Flatten an error and its sources into one line.
///
/// `reqwest` keeps the useful part ("connection refused") in the source chain.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

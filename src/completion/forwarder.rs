//! Backend forwarding.
//!
//! # Responsibilities
//! - Clear `stream` on the outgoing payload
//! - Join the configured base URL with the chat completions path
//! - Make exactly one call and translate the reply into the canonical shape
//!
//! # Design Decisions
//! - Only `200 OK` counts as success; any other status is surfaced with its body
//! - Failures are terminal for the request: no retry, no fallback to echo

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::completion::transport::{Transport, TransportError};
use crate::completion::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Path appended to the backend base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Failure while relaying a request to the backend.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outgoing payload could not be encoded.
    #[error("failed to marshal request: {0}")]
    Encode(#[source] serde_json::Error),

    /// No response was obtained (connect failure, reset, timeout).
    #[error("failed to forward request: {0}")]
    Transport(#[source] TransportError),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Backend { status: u16, body: String },

    /// The backend answered 200 but the body is not a completion response.
    #[error("failed to decode backend response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ForwardError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Encode(_) => "encode",
            Self::Transport(TransportError::Timeout(_)) => "timeout",
            Self::Transport(_) => "transport",
            Self::Backend { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }
}

/// Relays requests to a single configured backend.
#[derive(Clone)]
pub struct BackendForwarder {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl BackendForwarder {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: completions_url(base_url),
            transport,
        }
    }

    /// Fully-qualified URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Forward `request` and parse the backend's reply.
    ///
    /// The returned `id` is whatever the backend sent; the caller stamps the
    /// resolved request ID afterwards.
    pub async fn forward(
        &self,
        mut request: ChatCompletionRequest,
        request_id: &str,
    ) -> Result<ChatCompletionResponse, ForwardError> {
        request.stream = false;

        let body = serde_json::to_vec(&request).map_err(ForwardError::Encode)?;

        tracing::debug!(
            request_id = %request_id,
            endpoint = %self.endpoint,
            messages = request.messages.len(),
            "Forwarding to backend"
        );

        let response = self
            .transport
            .post_json(&self.endpoint, body, request_id)
            .await
            .map_err(ForwardError::Transport)?;

        if response.status != StatusCode::OK {
            return Err(ForwardError::Backend {
                status: response.status.as_u16(),
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        // A bare `null` body decodes to an empty response rather than failing
        serde_json::from_slice::<Option<ChatCompletionResponse>>(&response.body)
            .map(Option::unwrap_or_default)
            .map_err(ForwardError::Decode)
    }
}

/// Append the completions path, dropping one trailing `/` from the base.
pub fn completions_url(base_url: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}{CHAT_COMPLETIONS_PATH}")
}

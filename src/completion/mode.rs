//! Completion mode selection.

use crate::completion::echo::echo_completion;
use crate::completion::forwarder::{BackendForwarder, ForwardError};
use crate::completion::prompt::extract_last_user_message;
use crate::completion::transport::{HttpTransport, TransportError};
use crate::completion::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::BackendConfig;

use std::sync::Arc;

/// How completions are produced. Chosen once at startup.
#[derive(Clone)]
pub enum CompletionMode {
    /// No backend configured: reply with the last user message.
    Echo,
    /// Relay every request to the configured backend.
    Backend(BackendForwarder),
}

impl CompletionMode {
    /// Select the mode from configuration.
    ///
    /// A missing or empty backend URL means echo mode.
    pub fn from_config(config: &BackendConfig) -> Result<Self, TransportError> {
        match config.url.as_deref() {
            Some(url) if config.is_configured() => {
                let transport = HttpTransport::new(config)?;
                Ok(Self::Backend(BackendForwarder::new(url, Arc::new(transport))))
            }
            _ => Ok(Self::Echo),
        }
    }

    /// Label used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::Backend(_) => "backend",
        }
    }

    pub async fn complete(
        &self,
        request: ChatCompletionRequest,
        request_id: &str,
    ) -> Result<ChatCompletionResponse, ForwardError> {
        match self {
            Self::Echo => {
                let prompt = extract_last_user_message(&request.messages);
                Ok(echo_completion(request_id, prompt))
            }
            Self::Backend(forwarder) => forwarder.forward(request, request_id).await,
        }
    }
}

impl std::fmt::Debug for CompletionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Echo => write!(f, "Echo"),
            Self::Backend(forwarder) => write!(f, "Backend({})", forwarder.endpoint()),
        }
    }
}

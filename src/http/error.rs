//! Error taxonomy for the chat completions endpoint.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::completion::ForwardError;

/// Terminal failure for a single request.
///
/// Bodies are plain text, not the JSON success shape.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Anything but `POST`.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body is not a JSON chat completion request.
    #[error("Invalid JSON: {0}")]
    MalformedPayload(String),

    /// Body exceeds `limits.max_body_bytes`, when one is configured.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Connection failure, non-200 status, or undecodable backend reply.
    #[error("Backend error: {0}")]
    Backend(#[from] ForwardError),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut response = (status, format!("{self}\n")).into_response();
        let headers = response.headers_mut();
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        if matches!(self, Self::MethodNotAllowed) {
            headers.insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

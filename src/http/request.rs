//! Request parsing and correlation ID resolution.
//!
//! # Responsibilities
//! - Resolve the request's correlation ID from headers, or mint one
//! - Reject anything but `POST`
//! - Read the body (bounded only if `limits.max_body_bytes` is set) and decode it
//!
//! # Design Decisions
//! - Caller-supplied IDs are accepted verbatim: no format or length check
//! - Only the shape is validated; empty `messages` or unknown roles pass

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use uuid::Uuid;

use crate::completion::ChatCompletionRequest;
use crate::http::error::GatewayError;

/// Primary correlation header, also set on every response.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Fallback correlation header consulted when `X-Request-ID` is absent.
pub const REQUEST_ID_ALIAS: HeaderName = HeaderName::from_static("request-id");

/// Resolved correlation ID, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick `X-Request-ID`, then `Request-Id`, else a fresh UUID v4.
///
/// Empty values and values that are not visible ASCII count as absent.
pub fn resolve_request_id(headers: &HeaderMap) -> RequestId {
    [&X_REQUEST_ID, &REQUEST_ID_ALIAS]
        .into_iter()
        .find_map(|name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
        })
        .map(RequestId::new)
        .unwrap_or_else(|| RequestId(Uuid::new_v4().to_string()))
}

/// Validate the method and decode the body into a chat completion request.
pub async fn parse_chat_request(request: Request) -> Result<ChatCompletionRequest, GatewayError> {
    if request.method() != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }

    let body = Bytes::from_request(request, &()).await.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge
        } else {
            GatewayError::MalformedPayload(rejection.body_text())
        }
    })?;

    // A bare `null` body decodes to an empty request
    serde_json::from_slice::<Option<ChatCompletionRequest>>(&body)
        .map(Option::unwrap_or_default)
        .map_err(|e| GatewayError::MalformedPayload(e.to_string()))
}

//! Response assembly.
//!
//! # Responsibilities
//! - Overwrite `id` with the resolved request ID, whatever the backend sent
//! - Set `X-Request-ID` and `Content-Type`
//! - Serialize the body
//!
//! # Design Decisions
//! - The status is always 200 here. If serialization fails the error is
//!   logged and the client receives an empty 200 body.

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

use crate::completion::ChatCompletionResponse;
use crate::http::request::{RequestId, X_REQUEST_ID};

/// Stamp `request_id` onto `completion` and render it as a 200 response.
pub fn assemble_response(mut completion: ChatCompletionResponse, request_id: &RequestId) -> Response {
    completion.id = request_id.to_string();

    let body = match serde_json::to_vec(&completion) {
        Ok(mut bytes) => {
            bytes.push(b'\n');
            bytes
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Error encoding response");
            Vec::new()
        }
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    match HeaderValue::from_str(request_id.as_str()) {
        Ok(value) => {
            headers.insert(X_REQUEST_ID, value);
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Request ID is not a valid header value");
        }
    }

    response
}

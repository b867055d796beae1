//! Correlation ID middleware.
//! Resolves the request ID once and makes it visible to handlers, logs and clients.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::http::request::{X_REQUEST_ID, resolve_request_id};

/// Attach the resolved `RequestId` to the request and echo it on the response.
///
/// Handlers that set `X-Request-ID` themselves are left untouched; this
/// covers error responses and unmatched routes.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());
    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    if !response.headers().contains_key(X_REQUEST_ID) {
        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }
    }
    response
}

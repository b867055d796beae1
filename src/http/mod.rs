//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace layer)
//!     → middleware/request_id.rs (resolve X-Request-ID / Request-Id / UUID)
//!     → request.rs (method check, body read, JSON decode)
//!     → completion::CompletionMode (echo or backend)
//!     → response.rs (stamp id, set headers, serialize)
//!     → Send to client
//! ```
//!
//! Failures at any stage become an `error::GatewayError`, rendered as a
//! plain-text body with the matching status code.

pub mod error;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use error::GatewayError;
pub use request::{REQUEST_ID_ALIAS, RequestId, X_REQUEST_ID, parse_chat_request, resolve_request_id};
pub use response::assemble_response;
pub use server::{AppState, GatewayServer};

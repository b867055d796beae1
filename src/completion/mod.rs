//! Chat completion subsystem.
//!
//! # Data Flow
//! ```text
//! ChatCompletionRequest (validated by http::request)
//!     → mode.rs (Echo or Backend, fixed at startup)
//!         Echo    → prompt.rs (last user turn) → echo.rs (synthetic reply)
//!         Backend → forwarder.rs (stream=false, URL join, status check)
//!                     → transport.rs (pooled HTTP POST)
//!     → ChatCompletionResponse (id stamped later by http::response)
//! ```
//!
//! # Design Decisions
//! - Every entity is built per request and dropped after the response is written
//! - The transport is a trait object so tests can substitute a fake backend
//! - Forwarding is single-shot: no retries, no backoff, no circuit breaking

pub mod echo;
pub mod forwarder;
pub mod mode;
pub mod prompt;
pub mod transport;
pub mod types;

pub use echo::{approximate_tokens, echo_completion};
pub use forwarder::{BackendForwarder, ForwardError};
pub use mode::CompletionMode;
pub use prompt::extract_last_user_message;
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, Choice, Message, Usage};

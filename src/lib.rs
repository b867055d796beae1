//! OpenAI-compatible inference gateway.
//!
//! Accepts chat completion requests, resolves a correlation ID, and either
//! relays them to one configured backend or answers with a deterministic
//! echo when no backend is set.

pub mod completion;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use completion::CompletionMode;
pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::ShutdownHandle;

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! signals.rs: SIGINT/SIGTERM
//!     → shutdown.rs: ShutdownHandle::trigger
//!     → every subscriber (HTTP server) stops accepting and drains
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::ShutdownHandle;
pub use signals::wait_for_signal;

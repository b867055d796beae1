//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the forwarder produce:
//!     → logging.rs (structured log events, request_id span field)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;

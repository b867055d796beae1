//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment overrides: PORT, BACKEND_URL, LOG_LEVEL (loader.rs)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty environment is a valid config
//! - Environment wins over file so containers can override a baked-in file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, load};
pub use schema::{BackendConfig, GatewayConfig, LimitsConfig, ListenerConfig, ObservabilityConfig};
pub use validation::{ValidationError, validate_config};

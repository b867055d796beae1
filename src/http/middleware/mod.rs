//! Axum middleware for the gateway router.

pub mod request_id;

pub use request_id::request_id_middleware;

//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Downstream inference backend and its connection pool.
    pub backend: BackendConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port (`PORT`).
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the inference service (`BACKEND_URL`). `None` selects echo mode.
    pub url: Option<String>,

    /// Overall per-call timeout in seconds.
    pub timeout_secs: u64,

    /// Idle connections kept across all hosts.
    pub max_idle_connections: usize,

    /// Idle connections kept per host.
    pub max_idle_per_host: usize,

    /// Idle connection expiry in seconds.
    pub idle_timeout_secs: u64,

    /// Connection establishment (TCP + TLS handshake) timeout in seconds.
    pub tls_handshake_timeout_secs: u64,
}

impl BackendConfig {
    /// True when a non-empty backend URL is configured.
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 30,
            max_idle_connections: 100,
            max_idle_per_host: 10,
            idle_timeout_secs: 90,
            tls_handshake_timeout_secs: 10,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes. Unbounded when unset.
    pub max_body_bytes: Option<usize>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8080");
        assert!(!config.backend.is_configured());
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.backend.max_idle_connections, 100);
        assert_eq!(config.backend.max_idle_per_host, 10);
        assert_eq!(config.backend.idle_timeout_secs, 90);
        assert_eq!(config.backend.tls_handshake_timeout_secs, 10);
        assert!(config.limits.max_body_bytes.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [backend]
            url = "http://llm:8000"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert!(config.backend.is_configured());
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.backend.max_idle_per_host, 10);
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn test_empty_url_is_not_configured() {
        let backend = BackendConfig {
            url: Some(String::new()),
            ..Default::default()
        };
        assert!(!backend.is_configured());
    }
}

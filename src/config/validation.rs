//! Configuration validation.
//!
//! Returns every problem found, not just the first, so an operator can fix
//! a config in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backend.url '{url}' is invalid: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration for values serde cannot reject on its own.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let backend = &config.backend;

    if let Some(raw) = backend.url.as_deref().filter(|u| !u.is_empty()) {
        match url::Url::parse(raw) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError::InvalidBackendUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidBackendUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    let non_zero = [
        ("backend.timeout_secs", backend.timeout_secs == 0),
        ("backend.idle_timeout_secs", backend.idle_timeout_secs == 0),
        ("backend.tls_handshake_timeout_secs", backend.tls_handshake_timeout_secs == 0),
        ("backend.max_idle_connections", backend.max_idle_connections == 0),
        ("backend.max_idle_per_host", backend.max_idle_per_host == 0),
        ("limits.max_body_bytes", config.limits.max_body_bytes == Some(0)),
    ];
    errors.extend(
        non_zero
            .into_iter()
            .filter(|(_, zero)| *zero)
            .map(|(field, _)| ValidationError::Zero(field)),
    );

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_backend_url_checks() {
        let mut config = GatewayConfig::default();
        config.backend.url = Some("https://llm.internal/".into());
        assert!(validate_config(&config).is_ok());

        config.backend.url = Some("llm.internal:8000".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidBackendUrl { .. }));

        config.backend.url = Some("not a url".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.backend.timeout_secs = 0;
        config.backend.max_idle_per_host = 0;
        config.limits.max_body_bytes = Some(0);
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Zero("backend.timeout_secs")));
        assert!(errors.contains(&ValidationError::InvalidMetricsAddress("nowhere".into())));
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }
}

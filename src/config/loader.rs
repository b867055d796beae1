//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{ValidationError, validate_config};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidEnv { name: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidEnv { name, value } => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional file plus the process environment.
pub fn load(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let base = match path {
        Some(path) => read_file(path)?,
        None => GatewayConfig::default(),
    };
    load_with(base, |name| std::env::var(name).ok())
}

/// Apply environment overrides from `lookup` to `config`, then validate.
pub fn load_with<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
        config.listener.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { name: "PORT", value: port.clone() })?;
    }

    // Present but empty means "no backend", same as unset in the file
    if let Some(url) = lookup("BACKEND_URL") {
        config.backend.url = if url.is_empty() { None } else { Some(url) };
    }

    if let Some(level) = lookup("LOG_LEVEL").filter(|l| !l.is_empty()) {
        config.observability.log_level = level;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_env_uses_defaults() {
        let config = load_with(GatewayConfig::default(), env(&[])).unwrap();
        assert_eq!(config.listener.port, 8080);
        assert!(config.backend.url.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = load_with(
            GatewayConfig::default(),
            env(&[("PORT", "9001"), ("BACKEND_URL", "http://llm:8000/"), ("LOG_LEVEL", "debug")]),
        )
        .unwrap();
        assert_eq!(config.listener.port, 9001);
        assert_eq!(config.backend.url.as_deref(), Some("http://llm:8000/"));
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_empty_backend_url_clears_file_value() {
        let mut base = GatewayConfig::default();
        base.backend.url = Some("http://from-file".into());

        let config = load_with(base, env(&[("BACKEND_URL", "")])).unwrap();
        assert!(config.backend.url.is_none());
    }

    #[test]
    fn test_bad_port() {
        let err = load_with(GatewayConfig::default(), env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "PORT", .. }));
        assert_eq!(err.to_string(), "Invalid value for PORT: 'eighty'");
    }

    #[test]
    fn test_invalid_backend_url_from_env() {
        let err = load_with(GatewayConfig::default(), env(&[("BACKEND_URL", "ftp://x")])).unwrap_err();
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[listener]\nport = 7000\n\n[backend]\nurl = \"http://llm:8000\"\nmax_idle_per_host = 4"
        )
        .unwrap();

        let config = load_with(read_file(file.path()).unwrap(), env(&[])).unwrap();
        assert_eq!(config.listener.port, 7000);
        assert_eq!(config.backend.max_idle_per_host, 4);
        assert_eq!(config.backend.idle_timeout_secs, 90);
    }

    #[test]
    fn test_load_config_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nport = \"not a number\"").unwrap();
        assert!(matches!(read_file(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_zero_body_limit_from_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[limits]\nmax_body_bytes = 0").unwrap();

        let err = load_with(read_file(file.path()).unwrap(), env(&[])).unwrap_err();
        assert!(err.to_string().contains("limits.max_body_bytes"));
    }
}

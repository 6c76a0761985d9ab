use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::SecurityHeaders;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddr { key: &'static str, value: String },

    #[error("{key} must be a whole number of seconds: {value}")]
    InvalidTimeout { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub addr: SocketAddr,
    pub api_timeout: Duration,
    pub allowed_origins: String,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_value = lookup("STOREFRONT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                key: "STOREFRONT_ADDR",
                value: addr_value.clone(),
            })?;

        let api_timeout = match lookup("TICKETING_API_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout {
                    key: "TICKETING_API_TIMEOUT_SECS",
                    value,
                })?,
            None => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url: lookup("TICKETING_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            addr,
            api_timeout,
            allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            production: lookup("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.addr.port(), 3001);
        assert_eq!(config.api_timeout, Duration::from_secs(10));
        assert!(!config.production);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TICKETING_API_URL", "https://tickets.example.com/api"),
            ("STOREFRONT_ADDR", "127.0.0.1:8080"),
            ("TICKETING_API_TIMEOUT_SECS", "3"),
            ("RUST_ENV", "Production"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://tickets.example.com/api");
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.api_timeout, Duration::from_secs(3));
        assert!(config.production);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            config_from(&[("STOREFRONT_ADDR", "localhost")]),
            Err(ConfigError::InvalidAddr { .. })
        ));
        assert!(matches!(
            config_from(&[("TICKETING_API_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }
}

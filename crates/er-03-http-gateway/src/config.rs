//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use thiserror::Error;

/// Default cap on an inbound request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind. `0` picks an ephemeral port.
    pub port: u16,
    /// Requests with a larger body are answered with the error placeholder.
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl GatewayConfig {
    /// `host:port` to bind.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::InvalidHost(self.host.clone()));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }
        Ok(())
    }
}

/// Gateway configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Listen host is not an IP address
    #[error("invalid listen host: {0:?}")]
    InvalidHost(String),
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_rejects_hostname_and_zero_limit() {
        let config = GatewayConfig {
            host: "localhost".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHost(_))));

        let config = GatewayConfig {
            max_body_bytes: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLimit(_))));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GatewayConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}

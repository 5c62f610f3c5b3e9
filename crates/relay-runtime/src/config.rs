//! Runtime configuration: optional TOML file, then environment overrides.
//!
//! # Environment Variables
//!
//! - `ER_SEED_HOST`: seed node host
//! - `ER_SEED_SSL_PORT`: seed TLS port
//! - `ER_SEED_TCP_PORT`: seed plain TCP port
//! - `ER_LISTEN_PORT`: HTTP gateway port
//! - `ER_FORBIDDEN_METHODS`: comma separated forbidden method names
//! - `ER_LOG_LEVEL`: default log filter when `RUST_LOG` is unset
//! - `ER_JSON_LOGS`: `true`/`1` for JSON log lines

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use er_01_peer_discovery::{Node, RpcExchange, DEFAULT_MAX_RESPONSE_BYTES};
use er_02_relay::RelayConfig;
use er_03_http_gateway::GatewayConfig;

/// Complete process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub seed: SeedConfig,
    pub gateway: GatewayConfig,
    pub relay: RelaySection,
    pub logging: LoggingConfig,
}

/// The node the relay bootstraps from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub host: String,
    pub ssl_port: u16,
    pub tcp_port: u16,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            host: "electrum.blockstream.info".to_string(),
            ssl_port: 50002,
            tcp_port: 0,
        }
    }
}

impl SeedConfig {
    pub fn node(&self) -> Node {
        Node::seed(self.host.clone(), self.ssl_port, self.tcp_port)
    }
}

/// Relay policy and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySection {
    pub forbidden_methods: Vec<String>,
    pub bootstrap_timeout_secs: u64,
    pub forward_timeout_secs: u64,
    pub read_deadline_secs: u64,
    pub max_response_bytes: usize,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            forbidden_methods: Vec::new(),
            bootstrap_timeout_secs: 10,
            forward_timeout_secs: 10,
            read_deadline_secs: 5,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl RelaySection {
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            bootstrap_timeout: Duration::from_secs(self.bootstrap_timeout_secs),
            forward_timeout: Duration::from_secs(self.forward_timeout_secs),
        }
    }

    pub fn exchange(&self) -> RpcExchange {
        RpcExchange::new(
            Duration::from_secs(self.read_deadline_secs),
            self.max_response_bytes,
        )
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("invalid seed node: {0}")]
    InvalidSeed(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Gateway(#[from] er_03_http_gateway::ConfigError),
}

impl RuntimeConfig {
    /// Load from `path` (if any), apply process environment overrides and
    /// validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ER_SEED_HOST") {
            self.seed.host = host;
        }
        if let Some(port) = parse_env(&lookup, "ER_SEED_SSL_PORT")? {
            self.seed.ssl_port = port;
        }
        if let Some(port) = parse_env(&lookup, "ER_SEED_TCP_PORT")? {
            self.seed.tcp_port = port;
        }
        if let Some(port) = parse_env(&lookup, "ER_LISTEN_PORT")? {
            self.gateway.port = port;
        }
        if let Some(list) = lookup("ER_FORBIDDEN_METHODS") {
            self.relay.forbidden_methods = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(level) = lookup("ER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("ER_JSON_LOGS") {
            self.logging.json = json.eq_ignore_ascii_case("true") || json == "1";
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seed = self.seed.node();
        if seed.is_onion() {
            return Err(ConfigError::InvalidSeed(format!(
                "{}: onion seeds are not reachable",
                seed.host
            )));
        }
        if !seed.is_valid() {
            return Err(ConfigError::InvalidSeed(seed.to_string()));
        }

        let relay = &self.relay;
        if relay.bootstrap_timeout_secs == 0
            || relay.forward_timeout_secs == 0
            || relay.read_deadline_secs == 0
        {
            return Err(ConfigError::Invalid("timeouts cannot be 0".into()));
        }
        if relay.max_response_bytes == 0 {
            return Err(ConfigError::Invalid("max_response_bytes cannot be 0".into()));
        }
        if relay.forbidden_methods.iter().any(|m| m.is_empty()) {
            // An empty entry is a substring of every request.
            return Err(ConfigError::Invalid(
                "forbidden_methods cannot contain an empty entry".into(),
            ));
        }

        self.gateway.validate()?;
        Ok(())
    }
}

fn parse_env<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
    }
}

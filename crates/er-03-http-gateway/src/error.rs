//! Gateway errors.

use er_02_relay::RelayError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from running the gateway or serving one request.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The request body could not be read or exceeded the limit.
    #[error("failed to read request body: {0}")]
    Body(String),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

//! Relay errors.

use er_01_peer_discovery::DiscoveryError;
use thiserror::Error;

/// Failures surfaced by the relay. None of them are retried here.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Bootstrap discovery against the seed failed.
    #[error("bootstrap failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// A record offered for registration is not a usable node. The whole
    /// batch was rejected.
    #[error("invalid peer: {0}")]
    InvalidPeer(String),

    /// The registry, or the requested subset of it, is empty.
    #[error("no peers available")]
    NoPeersAvailable,

    /// The chosen peer did not answer a forwarded request.
    #[error("forwarding to {peer} failed: {source}")]
    ForwardFailed {
        /// Display form of the chosen peer.
        peer: String,
        #[source]
        source: DiscoveryError,
    },

    /// The request names a forbidden method.
    #[error("request contains forbidden method {0:?}")]
    ForbiddenMethod(String),
}

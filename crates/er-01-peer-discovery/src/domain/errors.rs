//! Domain Errors for Peer Discovery
//!
//! Every failure is reported to the caller; nothing in this crate retries.

use std::io;
use std::time::Duration;
use thiserror::Error;

use super::node::TransportKind;

/// Errors from connecting to a node, talking to it, or decoding its peers.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The node is only reachable through Tor.
    #[error("cannot reach {node}: tor transport is not implemented")]
    UnsupportedTransport {
        /// Host of the rejected node.
        node: String,
    },

    /// The dial (and TLS handshake, if any) failed or timed out.
    #[error("{transport} connection to {node} failed: {reason}")]
    ConnectionFailed {
        /// `host:port` that was dialed.
        node: String,
        /// Transport that was attempted.
        transport: TransportKind,
        /// Underlying error description.
        reason: String,
    },

    /// The request could not be written or the response not read.
    #[error("exchange with {node} failed: {source}")]
    ExchangeFailed {
        /// Dialed address of the node.
        node: String,
        #[source]
        source: ExchangeError,
    },

    /// The peer-list response could not be decoded or had no `result`.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The peer-list response decoded, but no entry produced a usable node.
    #[error("unable to parse valid peers from the response")]
    NoValidPeers,

    /// The TLS client configuration could not be built.
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),
}

/// Errors from one framed request/response round trip.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write request: {0}")]
    Write(#[source] io::Error),

    #[error("failed to read response: {0}")]
    Read(#[source] io::Error),

    #[error("no response within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("connection closed before the response terminator")]
    ConnectionClosed,

    #[error("response exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },
}

//! # Driving Ports (Inbound API)
//!
//! What this crate offers to the relay. The relay depends on the trait rather
//! than on [`crate::ElectrumClient`] so it can be exercised without sockets.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::{DiscoveryError, Node};

/// Talk to Electrum servers.
#[async_trait]
pub trait ElectrumApi: Send + Sync {
    /// Ask `node` for the peers it knows about.
    ///
    /// # Errors
    ///
    /// - `UnsupportedTransport` for onion nodes, before any I/O
    /// - `ConnectionFailed` / `ExchangeFailed` from the network
    /// - `MalformedResponse` / `NoValidPeers` from the parser
    async fn get_peer_info(
        &self,
        node: &Node,
        request_id: u64,
        timeout: Duration,
    ) -> Result<Vec<Node>, DiscoveryError>;

    /// Send an already-serialized request to `node` and return the raw
    /// response line, terminator included.
    async fn send_request_bytes(
        &self,
        payload: &[u8],
        node: &Node,
        timeout: Duration,
    ) -> Result<Vec<u8>, DiscoveryError>;
}

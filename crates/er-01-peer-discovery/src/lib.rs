//! # Electrum Peer Discovery
//!
//! Talks to Electrum servers over their line-delimited JSON-RPC dialect and
//! learns which other servers they know about.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** node records, address rules, transport tiers, errors
//! - **Protocol Layer:** JSON-RPC requests and the heuristic peer-list parser
//! - **Transport / Exchange:** TLS-or-plain dialing and one framed round trip
//! - **Ports Layer:** `ElectrumApi` (driving) and `RelayEventSink` (driven)
//! - **Service Layer:** [`ElectrumClient`], wiring the above together
//! - **Adapters Layer:** event sinks (tracing, no-op, recording)
//!
//! ## Transport Tiers
//!
//! | Record | Transport |
//! |--------|-----------|
//! | host ends in `.onion` | refused (`UnsupportedTransport`) |
//! | DNS hostname + SSL port | TLS, certificate not verified |
//! | anything else | plain TCP |
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::{sync::Arc, time::Duration};
//! use er_01_peer_discovery::{ElectrumClient, Node, TracingEventSink};
//!
//! let client = ElectrumClient::new(Arc::new(TracingEventSink::new()))?;
//! let seed = Node::seed("electrum.blockstream.info", 50002, 0);
//! let peers = client.get_peer_info(&seed, 42, Duration::from_secs(10)).await?;
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod exchange;
pub mod ports;
pub mod protocol;
pub mod service;
pub mod transport;

/// In-process mock Electrum node.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain
pub use domain::{
    is_onion_addr, valid_hostname, valid_ip, DiscoveryError, ExchangeError, Features, Node,
    TransportKind, ONION_SUFFIX,
};

// Protocol
pub use protocol::{
    decode_peers_response, parse_peer, parse_server_features, parse_server_peers_subscription,
    valid_peer_entry, JsonRpcRequest, ServerPeersSubscriptionResponse, JSONRPC_VERSION,
    PEERS_SUBSCRIBE,
};

// Transport and exchange
pub use exchange::{RpcExchange, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_READ_DEADLINE};
pub use transport::{select_transport, NodeConnector, NodeStream};

// Ports
pub use ports::{ElectrumApi, RelayEvent, RelayEventSink};

// Service
pub use service::ElectrumClient;

// Adapters
pub use adapters::{NoOpEventSink, RecordingEventSink, TracingEventSink};

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{peers_response, MockBehaviour, MockElectrumNode};

//! Cross-crate flows.

pub mod bootstrap_flow;
pub mod relay_http_flow;

use er_01_peer_discovery::MockElectrumNode;
use serde_json::{json, Value};

/// Peer-list entry advertising `mock` over plain TCP.
///
/// Loopback is not a routable IP, but `127.0.0.1` is also a well-formed DNS
/// name, so the entry lands in the host slot, passes validation and is dialed
/// over TCP because no SSL port is advertised.
pub fn loopback_entry(mock: &MockElectrumNode) -> Value {
    json!(["127.0.0.1", "127.0.0.1", ["v1.4.2", format!("t{}", mock.port())]])
}

/// An onion peer, which the relay registers but never forwards to.
pub fn onion_entry() -> Value {
    json!(["", "explorerzydxu5ecjrkwceayqybizmpjjznk5izmitf2modhcusuqlid.onion", ["v1.4", "s50002", "t50001"]])
}

/// `server.peers.subscribe` reply listing `entries`.
pub fn seed_reply(entries: Vec<Value>) -> String {
    json!({ "jsonrpc": "2.0", "id": 0, "result": entries }).to_string()
}

//! `server.peers.subscribe` Response Decoding
//!
//! The response `result` is a list of positional, loosely typed entries:
//!
//! ```text
//! [ "164.132.182.11", "1.fulcrum-node.com", ["v1.4.5", "s50002", "t50001"] ]
//!   address           address              tagged feature strings
//! ```
//!
//! Decoding is heuristic. Each slot is checked on its own and a slot that
//! does not fit is left empty; the synthesized [`Node`] is kept only if it
//! passes [`Node::is_valid`].

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{valid_hostname, valid_ip, DiscoveryError, Features, Node};

/// Wire shape of a peer-list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerPeersSubscriptionResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "jsonrpc")]
    pub version: Option<String>,
    #[serde(default)]
    pub result: Option<Vec<Value>>,
}

/// Decode raw response bytes and parse the peers they list.
pub fn decode_peers_response(bytes: &[u8]) -> Result<Vec<Node>, DiscoveryError> {
    let response: ServerPeersSubscriptionResponse = serde_json::from_slice(bytes)
        .map_err(|e| DiscoveryError::MalformedResponse(e.to_string()))?;
    parse_server_peers_subscription(&response)
}

/// Turn a decoded response into validated nodes, preserving entry order.
///
/// A missing `result` is malformed. A response that yields no usable node is
/// a failure rather than an empty success.
pub fn parse_server_peers_subscription(
    response: &ServerPeersSubscriptionResponse,
) -> Result<Vec<Node>, DiscoveryError> {
    let entries = response.result.as_ref().ok_or_else(|| {
        DiscoveryError::MalformedResponse("response contained no result field".to_string())
    })?;

    let peers: Vec<Node> = entries
        .iter()
        .filter_map(|entry| entry.as_array())
        .filter_map(|entry| parse_peer(entry))
        .collect();

    if peers.is_empty() {
        return Err(DiscoveryError::NoValidPeers);
    }
    Ok(peers)
}

/// A peer entry is well-formed iff it has exactly three non-null elements.
pub fn valid_peer_entry(entry: &[Value]) -> bool {
    entry.len() == 3 && entry.iter().all(|v| !v.is_null())
}

/// Synthesize a node from one entry. Returns `None` if the result is invalid.
pub fn parse_peer(entry: &[Value]) -> Option<Node> {
    let mut node = Node::default();

    if valid_peer_entry(entry) {
        // First slot: an IP, or an onion address we don't keep.
        let addr = entry[0].as_str().unwrap_or_default();
        if valid_ip(addr) {
            node.ip = addr.to_string();
        }

        // Second slot: the same IP again, or a hostname.
        let host = entry[1].as_str().unwrap_or_default();
        if !valid_ip(host) && valid_hostname(host) {
            node.host = host.to_string();
        }

        let features = match entry[2].as_array() {
            Some(list) => parse_server_features(list),
            None => Features::default(),
        };
        node.register_features(&features);
    }

    node.is_valid().then_some(node)
}

/// Decode the tagged feature strings of one entry.
///
/// The first byte is the tag: `v` keeps the whole string as the version,
/// `p`, `t` and `s` parse the remainder as pruning limit, TCP port and SSL
/// port. Unparsable or non-positive numbers leave the previous value in
/// place. Unknown tags, empty strings and non-strings are skipped.
pub fn parse_server_features(list: &[Value]) -> Features {
    let mut features = Features::default();

    for item in list {
        let Some(text) = item.as_str() else {
            continue;
        };
        // Tags are ASCII, so slicing after the first byte stays on a char boundary.
        match text.as_bytes().first() {
            Some(b'v') => features.version = text.to_string(),
            Some(b'p') => {
                if let Some(limit) = positive::<u64>(&text[1..]) {
                    features.pruning_limit = limit;
                }
            }
            Some(b't') => {
                if let Some(port) = positive::<u16>(&text[1..]) {
                    features.tcp_port = port;
                }
            }
            Some(b's') => {
                if let Some(port) = positive::<u16>(&text[1..]) {
                    features.ssl_port = port;
                }
            }
            _ => {}
        }
    }

    features
}

fn positive<T>(digits: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    digits.parse::<T>().ok().filter(|n| *n > T::default())
}

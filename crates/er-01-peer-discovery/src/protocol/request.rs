//! JSON-RPC request as sent to Electrum servers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version spoken by Electrum servers.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method returning the peers a server knows about.
pub const PEERS_SUBSCRIBE: &str = "server.peers.subscribe";

/// A JSON-RPC request. Serializes as
/// `{"jsonrpc":"2.0","id":<int>,"method":<string>,"params":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    pub version: String,
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    pub fn new(
        version: impl Into<String>,
        id: u64,
        method: impl Into<String>,
        params: Vec<Value>,
    ) -> Self {
        Self {
            version: version.into(),
            id,
            method: method.into(),
            params,
        }
    }

    /// `server.peers.subscribe` with the given request id.
    pub fn peers_subscribe(id: u64) -> Self {
        Self::new(JSONRPC_VERSION, id, PEERS_SUBSCRIBE, Vec::new())
    }
}

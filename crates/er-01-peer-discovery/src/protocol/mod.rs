//! Electrum wire protocol: requests and peer-list responses.

pub mod peers;
pub mod request;

pub use peers::{
    decode_peers_response, parse_peer, parse_server_features, parse_server_peers_subscription,
    valid_peer_entry, ServerPeersSubscriptionResponse,
};
pub use request::{JsonRpcRequest, JSONRPC_VERSION, PEERS_SUBSCRIBE};

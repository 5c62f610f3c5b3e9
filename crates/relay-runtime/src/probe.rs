//! `peers` subcommand: one discovery round against a single node.

use std::time::Duration;

use er_01_peer_discovery::{DiscoveryError, ElectrumClient, Node};

use crate::cli::PeersArgs;

/// Node record described by the command line.
pub fn target(args: &PeersArgs) -> Node {
    Node::seed(args.host.clone(), args.ssl_port, args.tcp_port)
}

/// Ask the node in `args` for its peers.
pub async fn probe(client: &ElectrumClient, args: &PeersArgs) -> Result<Vec<Node>, DiscoveryError> {
    client
        .get_peer_info(
            &target(args),
            args.id,
            Duration::from_secs(args.timeout_secs),
        )
        .await
}

/// One peer per line, or a JSON array.
pub fn render(peers: &[Node], json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(peers);
    }
    Ok(peers
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

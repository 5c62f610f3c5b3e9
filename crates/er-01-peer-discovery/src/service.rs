//! # Discovery Client
//!
//! Wires the connector, the exchange and the peer-list parser together and
//! implements the [`ElectrumApi`] driving port.
//!
//! Every call opens a fresh connection, performs one exchange and shuts the
//! connection down whatever the outcome. Nothing is retried.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::domain::{DiscoveryError, ExchangeError, Node};
use crate::exchange::RpcExchange;
use crate::ports::{ElectrumApi, RelayEvent, RelayEventSink};
use crate::protocol::{decode_peers_response, JsonRpcRequest};
use crate::transport::{NodeConnector, NodeStream};

/// Upper bound on the graceful close after an exchange.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Client for Electrum servers.
#[derive(Clone)]
pub struct ElectrumClient {
    connector: NodeConnector,
    exchange: RpcExchange,
    sink: Arc<dyn RelayEventSink>,
}

impl ElectrumClient {
    /// Create a client with the default exchange settings.
    ///
    /// # Errors
    ///
    /// `TlsConfig` if the TLS client configuration cannot be built.
    pub fn new(sink: Arc<dyn RelayEventSink>) -> Result<Self, DiscoveryError> {
        Self::with_exchange(RpcExchange::default(), sink)
    }

    /// Create a client with explicit exchange settings.
    pub fn with_exchange(
        exchange: RpcExchange,
        sink: Arc<dyn RelayEventSink>,
    ) -> Result<Self, DiscoveryError> {
        Ok(Self {
            connector: NodeConnector::new(sink.clone())?,
            exchange,
            sink,
        })
    }

    pub fn exchange(&self) -> &RpcExchange {
        &self.exchange
    }

    /// Open a connection to `node`.
    pub async fn connect(
        &self,
        node: &Node,
        timeout: Duration,
    ) -> Result<NodeStream, DiscoveryError> {
        self.connector.connect(node, timeout).await
    }

    /// Serialize and send `request` to `node`, returning the raw response line.
    pub async fn send_request(
        &self,
        request: &JsonRpcRequest,
        node: &Node,
        timeout: Duration,
    ) -> Result<Vec<u8>, DiscoveryError> {
        let payload = serde_json::to_vec(request).map_err(|e| DiscoveryError::ExchangeFailed {
            node: node.dial_host().to_string(),
            source: ExchangeError::Serialize(e),
        })?;
        self.send_request_bytes(&payload, node, timeout).await
    }

    /// Send already-serialized `payload` to `node`, returning the raw
    /// response line.
    pub async fn send_request_bytes(
        &self,
        payload: &[u8],
        node: &Node,
        timeout: Duration,
    ) -> Result<Vec<u8>, DiscoveryError> {
        let mut stream = self.connect(node, timeout).await?;
        let result = self.exchange.send_raw(&mut stream, payload).await;
        close(stream).await;

        match result {
            Ok(response) => {
                self.sink.record(RelayEvent::ExchangeCompleted {
                    node,
                    request_bytes: payload.len(),
                    response_bytes: response.len(),
                });
                Ok(response)
            }
            Err(source) => {
                let reason = source.to_string();
                self.sink.record(RelayEvent::ExchangeFailed {
                    node,
                    reason: &reason,
                });
                Err(DiscoveryError::ExchangeFailed {
                    node: node.dial_host().to_string(),
                    source,
                })
            }
        }
    }

    /// Ask `node` for its known peers.
    ///
    /// Onion nodes are refused before any I/O.
    pub async fn get_peer_info(
        &self,
        node: &Node,
        request_id: u64,
        timeout: Duration,
    ) -> Result<Vec<Node>, DiscoveryError> {
        let result = self.fetch_peers(node, request_id, timeout).await;
        match &result {
            Ok(peers) => self.sink.record(RelayEvent::PeersDiscovered {
                node,
                count: peers.len(),
            }),
            Err(e) => {
                let reason = e.to_string();
                self.sink.record(RelayEvent::DiscoveryFailed {
                    node,
                    reason: &reason,
                });
            }
        }
        result
    }

    async fn fetch_peers(
        &self,
        node: &Node,
        request_id: u64,
        timeout: Duration,
    ) -> Result<Vec<Node>, DiscoveryError> {
        if node.is_onion() {
            return Err(DiscoveryError::UnsupportedTransport {
                node: node.dial_host().to_string(),
            });
        }
        let request = JsonRpcRequest::peers_subscribe(request_id);
        let response = self.send_request(&request, node, timeout).await?;
        decode_peers_response(&response)
    }
}

async fn close(mut stream: NodeStream) {
    // Dropping the stream closes it regardless of how the shutdown went.
    let _ = tokio::time::timeout(SHUTDOWN_GRACE, stream.shutdown()).await;
}

#[async_trait]
impl ElectrumApi for ElectrumClient {
    async fn get_peer_info(
        &self,
        node: &Node,
        request_id: u64,
        timeout: Duration,
    ) -> Result<Vec<Node>, DiscoveryError> {
        ElectrumClient::get_peer_info(self, node, request_id, timeout).await
    }

    async fn send_request_bytes(
        &self,
        payload: &[u8],
        node: &Node,
        timeout: Duration,
    ) -> Result<Vec<u8>, DiscoveryError> {
        ElectrumClient::send_request_bytes(self, payload, node, timeout).await
    }
}

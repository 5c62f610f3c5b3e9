//! # Node Connector
//!
//! Tiered connection establishment. The tier is decided once from the record
//! ([`Node::transport`]) and then dispatched:
//!
//! 1. onion host: refused with `UnsupportedTransport`, never downgraded
//! 2. hostname with SSL port: TLS to `host:ssl_port`
//! 3. otherwise: plain TCP to `host:tcp_port`
//!
//! Every dial, TLS handshake included, is bounded by the caller's timeout.
//! A dial that times out is dropped, which closes the half-open socket.

pub mod tls;

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use rustls::pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use crate::domain::{DiscoveryError, Node, TransportKind};
use crate::ports::{RelayEvent, RelayEventSink};

/// Pure transport decision for `node`.
pub fn select_transport(node: &Node) -> TransportKind {
    node.transport()
}

/// An established connection to a node.
#[derive(Debug)]
pub enum NodeStream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl NodeStream {
    /// Transport this stream was opened with.
    pub fn transport(&self) -> TransportKind {
        match self {
            Self::Plain(_) => TransportKind::Plain,
            Self::Tls(_) => TransportKind::Tls,
        }
    }
}

impl AsyncRead for NodeStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Plain(s) => Pin::new(s).poll_read(cx, buf),
            Self::Tls(s) => Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for NodeStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Self::Plain(s) => Pin::new(s).poll_write(cx, buf),
            Self::Tls(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Plain(s) => Pin::new(s).poll_flush(cx),
            Self::Tls(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Plain(s) => Pin::new(s).poll_shutdown(cx),
            Self::Tls(s) => Pin::new(s).poll_shutdown(cx),
        }
    }
}

/// Opens connections to nodes. Holds no per-connection state.
#[derive(Clone)]
pub struct NodeConnector {
    tls: TlsConnector,
    sink: Arc<dyn RelayEventSink>,
}

impl NodeConnector {
    /// Create a connector reporting to `sink`.
    ///
    /// # Errors
    ///
    /// `TlsConfig` if the TLS client configuration cannot be built.
    pub fn new(sink: Arc<dyn RelayEventSink>) -> Result<Self, DiscoveryError> {
        Ok(Self {
            tls: TlsConnector::from(tls::client_config()?),
            sink,
        })
    }

    /// Connect to `node` using the tier its record selects.
    pub async fn connect(
        &self,
        node: &Node,
        timeout: Duration,
    ) -> Result<NodeStream, DiscoveryError> {
        let transport = select_transport(node);
        if transport == TransportKind::Unsupported {
            let err = DiscoveryError::UnsupportedTransport {
                node: node.dial_host().to_string(),
            };
            self.sink.record(RelayEvent::ConnectFailed {
                node,
                transport,
                reason: "tor support not yet implemented",
            });
            return Err(err);
        }

        self.sink.record(RelayEvent::ConnectAttempt { node, transport });
        let result = match transport {
            TransportKind::Tls => self.dial_tls(node, timeout).await,
            _ => self.dial_plain(node, timeout).await,
        };

        match &result {
            Ok(_) => self.sink.record(RelayEvent::Connected { node, transport }),
            Err(e) => {
                let reason = e.to_string();
                self.sink.record(RelayEvent::ConnectFailed {
                    node,
                    transport,
                    reason: &reason,
                });
            }
        }
        result
    }

    async fn dial_tls(&self, node: &Node, timeout: Duration) -> Result<NodeStream, DiscoveryError> {
        let addr = format!("{}:{}", node.dial_host(), node.ssl_port);
        let server_name = ServerName::try_from(node.host.clone())
            .map_err(|e| connection_failed(&addr, TransportKind::Tls, e.to_string()))?;

        let handshake = async {
            let tcp = TcpStream::connect(&addr).await?;
            self.tls.connect(server_name, tcp).await
        };

        match tokio::time::timeout(timeout, handshake).await {
            Ok(Ok(stream)) => Ok(NodeStream::Tls(Box::new(stream))),
            Ok(Err(e)) => Err(connection_failed(&addr, TransportKind::Tls, e.to_string())),
            Err(_) => Err(connection_failed(
                &addr,
                TransportKind::Tls,
                format!("timed out after {:?}", timeout),
            )),
        }
    }

    async fn dial_plain(
        &self,
        node: &Node,
        timeout: Duration,
    ) -> Result<NodeStream, DiscoveryError> {
        let addr = format!("{}:{}", node.dial_host(), node.tcp_port);

        match tokio::time::timeout(timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => Ok(NodeStream::Plain(stream)),
            Ok(Err(e)) => Err(connection_failed(&addr, TransportKind::Plain, e.to_string())),
            Err(_) => Err(connection_failed(
                &addr,
                TransportKind::Plain,
                format!("timed out after {:?}", timeout),
            )),
        }
    }
}

fn connection_failed(addr: &str, transport: TransportKind, reason: String) -> DiscoveryError {
    DiscoveryError::ConnectionFailed {
        node: addr.to_string(),
        transport,
        reason,
    }
}

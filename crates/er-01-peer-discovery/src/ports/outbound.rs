//! # Driven Ports (Outbound SPI)
//!
//! Interfaces this crate requires from the host application.

use crate::domain::{Node, TransportKind};

/// Something worth reporting about relay traffic.
///
/// Events borrow from the caller so that sinks which ignore them cost nothing.
#[derive(Debug, Clone, Copy)]
pub enum RelayEvent<'a> {
    /// About to dial a node.
    ConnectAttempt {
        node: &'a Node,
        transport: TransportKind,
    },
    /// Dial (and handshake) succeeded.
    Connected {
        node: &'a Node,
        transport: TransportKind,
    },
    /// Dial failed or was refused.
    ConnectFailed {
        node: &'a Node,
        transport: TransportKind,
        reason: &'a str,
    },
    /// A framed request was answered.
    ExchangeCompleted {
        node: &'a Node,
        request_bytes: usize,
        response_bytes: usize,
    },
    /// A framed request failed.
    ExchangeFailed { node: &'a Node, reason: &'a str },
    /// A peer list was decoded.
    PeersDiscovered { node: &'a Node, count: usize },
    /// Peer discovery failed at any stage.
    DiscoveryFailed { node: &'a Node, reason: &'a str },
    /// Bootstrap discovery against a seed is starting.
    BootstrapStarted { seed: &'a Node, request_id: u64 },
    /// A batch of peers was added to the registry.
    PeersRegistered { added: usize, total: usize },
    /// A client request was refused before forwarding.
    RequestRejected { reason: &'a str },
    /// A client request was relayed.
    Forwarded { node: &'a Node, response_bytes: usize },
    /// A client request could not be relayed.
    ForwardFailed { node: &'a Node, reason: &'a str },
}

impl RelayEvent<'_> {
    /// Stable name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectAttempt { .. } => "connect_attempt",
            Self::Connected { .. } => "connected",
            Self::ConnectFailed { .. } => "connect_failed",
            Self::ExchangeCompleted { .. } => "exchange_completed",
            Self::ExchangeFailed { .. } => "exchange_failed",
            Self::PeersDiscovered { .. } => "peers_discovered",
            Self::DiscoveryFailed { .. } => "discovery_failed",
            Self::BootstrapStarted { .. } => "bootstrap_started",
            Self::PeersRegistered { .. } => "peers_registered",
            Self::RequestRejected { .. } => "request_rejected",
            Self::Forwarded { .. } => "forwarded",
            Self::ForwardFailed { .. } => "forward_failed",
        }
    }
}

/// Observability sink injected into every component that reports events.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; events arrive from concurrent
/// request tasks.
pub trait RelayEventSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: RelayEvent<'_>);
}

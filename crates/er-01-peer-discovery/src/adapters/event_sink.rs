//! Event sink adapters.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::ports::{RelayEvent, RelayEventSink};

// ============================================================================
// TracingEventSink - Production sink
// ============================================================================

/// Emits every event as a structured `tracing` record.
///
/// Connection and exchange chatter is logged at DEBUG, discovery and
/// registration at INFO, failures at WARN.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RelayEventSink for TracingEventSink {
    fn record(&self, event: RelayEvent<'_>) {
        match event {
            RelayEvent::ConnectAttempt { node, transport } => {
                debug!(node = %node.dial_host(), %transport, "connecting");
            }
            RelayEvent::Connected { node, transport } => {
                debug!(node = %node.dial_host(), %transport, "connection established");
            }
            RelayEvent::ConnectFailed {
                node,
                transport,
                reason,
            } => {
                warn!(node = %node.dial_host(), %transport, reason, "connection failed");
            }
            RelayEvent::ExchangeCompleted {
                node,
                request_bytes,
                response_bytes,
            } => {
                debug!(node = %node.dial_host(), request_bytes, response_bytes, "exchange completed");
            }
            RelayEvent::ExchangeFailed { node, reason } => {
                warn!(node = %node.dial_host(), reason, "exchange failed");
            }
            RelayEvent::PeersDiscovered { node, count } => {
                info!(node = %node.dial_host(), count, "retrieved peer information");
            }
            RelayEvent::DiscoveryFailed { node, reason } => {
                warn!(node = %node.dial_host(), reason, "peer discovery failed");
            }
            RelayEvent::BootstrapStarted { seed, request_id } => {
                info!(seed = %seed, request_id, "bootstrapping from seed");
            }
            RelayEvent::PeersRegistered { added, total } => {
                info!(added, total, "registered peers");
            }
            RelayEvent::RequestRejected { reason } => {
                warn!(reason, "request rejected");
            }
            RelayEvent::Forwarded {
                node,
                response_bytes,
            } => {
                debug!(node = %node.dial_host(), response_bytes, "request forwarded");
            }
            RelayEvent::ForwardFailed { node, reason } => {
                warn!(node = %node.dial_host(), reason, "forward failed");
            }
        }
    }
}

// ============================================================================
// NoOpEventSink / RecordingEventSink - Testing
// ============================================================================

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

impl RelayEventSink for NoOpEventSink {
    fn record(&self, _event: RelayEvent<'_>) {}
}

/// Keeps the names of recorded events, in order, for assertions.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingEventSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().clone()
    }

    /// How many events named `name` were recorded.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| **e == name).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl RelayEventSink for RecordingEventSink {
    fn record(&self, event: RelayEvent<'_>) {
        self.events.lock().push(event.name());
    }
}

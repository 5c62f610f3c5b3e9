//! # Relay Service
//!
//! Owns the peer registry and the method filter and drives the
//! [`ElectrumApi`] port for bootstrap and forwarding.
//!
//! The registry lock is never held across a network call: bootstrap
//! discovers first and appends afterwards, forwarding selects a peer (clone
//! under the lock) and then talks to it.

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use er_01_peer_discovery::{ElectrumApi, Node, RelayEvent, RelayEventSink};

use crate::domain::{MethodFilter, PeerRegistry, RelayError, RelayState};

/// Request ids for bootstrap discovery are drawn from `0..BOOTSTRAP_ID_RANGE`.
const BOOTSTRAP_ID_RANGE: u64 = 512;

/// Timeouts applied by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Bound on dialing the seed.
    pub bootstrap_timeout: Duration,
    /// Bound on dialing the chosen peer for a forwarded request.
    pub forward_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bootstrap_timeout: Duration::from_secs(10),
            forward_timeout: Duration::from_secs(10),
        }
    }
}

/// The relay: a peer registry plus the policy for using it.
pub struct Relay {
    registry: PeerRegistry,
    filter: MethodFilter,
    client: Arc<dyn ElectrumApi>,
    sink: Arc<dyn RelayEventSink>,
    config: RelayConfig,
    /// Discovery calls currently in flight.
    bootstrapping: AtomicUsize,
}

impl Relay {
    /// Create an empty relay.
    ///
    /// # Arguments
    ///
    /// * `forbidden_methods` - names that block any request containing them
    /// * `client` - discovery/forwarding port
    /// * `sink` - observability sink
    pub fn new(
        forbidden_methods: Vec<String>,
        client: Arc<dyn ElectrumApi>,
        sink: Arc<dyn RelayEventSink>,
    ) -> Self {
        Self {
            registry: PeerRegistry::new(),
            filter: MethodFilter::new(forbidden_methods),
            client,
            sink,
            config: RelayConfig::default(),
            bootstrapping: AtomicUsize::new(0),
        }
    }

    pub fn with_config(mut self, config: RelayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timeouts(self, bootstrap: Duration, forward: Duration) -> Self {
        self.with_config(RelayConfig {
            bootstrap_timeout: bootstrap,
            forward_timeout: forward,
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RelayState {
        if !self.registry.is_empty() {
            RelayState::Ready
        } else if self.bootstrapping.load(Ordering::Acquire) > 0 {
            RelayState::Bootstrapping
        } else {
            RelayState::Empty
        }
    }

    /// Discover peers from `seed` and register them. Returns the number of
    /// peers added.
    ///
    /// # Errors
    ///
    /// The discovery error, unchanged, wrapped in `RelayError::Discovery`.
    /// The registry is left as it was.
    pub async fn bootstrap(&self, seed: &Node) -> Result<usize, RelayError> {
        let request_id = rand::thread_rng().gen_range(0..BOOTSTRAP_ID_RANGE);
        self.sink.record(RelayEvent::BootstrapStarted {
            seed,
            request_id,
        });

        self.bootstrapping.fetch_add(1, Ordering::AcqRel);
        let discovered = self
            .client
            .get_peer_info(seed, request_id, self.config.bootstrap_timeout)
            .await;
        self.bootstrapping.fetch_sub(1, Ordering::AcqRel);

        let peers = discovered?;
        let added = peers.len();
        self.register_peers(peers)?;
        Ok(added)
    }

    /// Register one peer.
    pub fn register_peer(&self, peer: Node) -> Result<(), RelayError> {
        self.register_peers(vec![peer])
    }

    /// Register a batch, all or nothing.
    pub fn register_peers(&self, peers: Vec<Node>) -> Result<(), RelayError> {
        let added = peers.len();
        let total = self.registry.register_peers(peers)?;
        self.sink
            .record(RelayEvent::PeersRegistered { added, total });
        Ok(())
    }

    /// False iff some forbidden entry occurs anywhere in `request`.
    pub fn allowed_method(&self, request: &[u8]) -> bool {
        self.filter.allows(request)
    }

    /// Check `request` against the filter and hand it back for forwarding.
    pub fn validate_request<'a>(&self, request: &'a [u8]) -> Result<&'a [u8], RelayError> {
        match self.filter.matched(request) {
            None => Ok(request),
            Some(name) => {
                let reason = format!("forbidden method {}", name);
                self.sink.record(RelayEvent::RequestRejected { reason: &reason });
                Err(RelayError::ForbiddenMethod(name.to_string()))
            }
        }
    }

    /// Uniformly pick a registered peer.
    pub fn select_random_peer(&self, exclude_onions: bool) -> Result<Node, RelayError> {
        self.registry.select_random(exclude_onions)
    }

    /// Relay `request` verbatim to a random non-onion peer and return its
    /// raw response line.
    pub async fn forward_request(&self, request: &[u8]) -> Result<Vec<u8>, RelayError> {
        let peer = self.select_random_peer(true)?;

        match self
            .client
            .send_request_bytes(request, &peer, self.config.forward_timeout)
            .await
        {
            Ok(response) => {
                self.sink.record(RelayEvent::Forwarded {
                    node: &peer,
                    response_bytes: response.len(),
                });
                Ok(response)
            }
            Err(source) => {
                let reason = source.to_string();
                self.sink.record(RelayEvent::ForwardFailed {
                    node: &peer,
                    reason: &reason,
                });
                Err(RelayError::ForwardFailed {
                    peer: peer.to_string(),
                    source,
                })
            }
        }
    }

    /// Copy of the registered peers.
    pub fn peers(&self) -> Vec<Node> {
        self.registry.snapshot()
    }

    pub fn peer_count(&self) -> usize {
        self.registry.len()
    }

    pub fn forbidden_methods(&self) -> &[String] {
        self.filter.forbidden()
    }
}

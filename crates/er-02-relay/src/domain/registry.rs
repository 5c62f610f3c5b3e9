//! # Peer Registry
//!
//! The relay's only shared mutable state: the list of known peers behind a
//! single lock.
//!
//! ## Invariants
//!
//! - Every stored record passes [`Node::is_valid`].
//! - A batch is validated completely before the lock is taken, then appended
//!   in one critical section, so readers never see half a batch.
//! - The inner vector never escapes the lock; callers get clones.
//! - Duplicates are allowed.

use parking_lot::Mutex;
use rand::seq::SliceRandom;

use er_01_peer_discovery::Node;

use super::errors::RelayError;

/// Thread-safe set of known peers.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: Mutex<Vec<Node>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one peer. Returns the new total.
    pub fn register_peer(&self, peer: Node) -> Result<usize, RelayError> {
        self.register_peers(vec![peer])
    }

    /// Register a batch, all or nothing. Returns the new total.
    pub fn register_peers(&self, peers: Vec<Node>) -> Result<usize, RelayError> {
        if let Some(bad) = peers.iter().find(|p| !p.is_valid()) {
            return Err(RelayError::InvalidPeer(bad.to_string()));
        }
        let mut guard = self.peers.lock();
        guard.extend(peers);
        Ok(guard.len())
    }

    /// Uniformly pick one peer, optionally skipping onion hosts.
    pub fn select_random(&self, exclude_onions: bool) -> Result<Node, RelayError> {
        let guard = self.peers.lock();
        let candidates: Vec<&Node> = guard
            .iter()
            .filter(|p| !(exclude_onions && p.is_onion()))
            .collect();
        candidates
            .choose(&mut rand::thread_rng())
            .map(|p| (*p).clone())
            .ok_or(RelayError::NoPeersAvailable)
    }

    /// Copy of the current peer list.
    pub fn snapshot(&self) -> Vec<Node> {
        self.peers.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.peers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.lock().is_empty()
    }
}

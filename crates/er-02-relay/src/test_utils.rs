//! Scripted [`ElectrumApi`] double for exercising the relay without sockets.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use er_01_peer_discovery::{DiscoveryError, ElectrumApi, Node};

/// Answers queued per call kind; an exhausted queue yields `NoValidPeers`
/// for discovery and echoes the payload for forwards.
#[derive(Default)]
pub struct ScriptedElectrumApi {
    peer_answers: Mutex<VecDeque<Result<Vec<Node>, DiscoveryError>>>,
    forward_answers: Mutex<VecDeque<Result<Vec<u8>, DiscoveryError>>>,
    discovery_calls: Mutex<Vec<(Node, u64)>>,
    forward_calls: Mutex<Vec<(Node, Vec<u8>)>>,
}

impl ScriptedElectrumApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_peers(&self, answer: Result<Vec<Node>, DiscoveryError>) -> &Self {
        self.peer_answers.lock().push_back(answer);
        self
    }

    pub fn push_forward(&self, answer: Result<Vec<u8>, DiscoveryError>) -> &Self {
        self.forward_answers.lock().push_back(answer);
        self
    }

    /// `(node, request_id)` of every discovery call.
    pub fn discovery_calls(&self) -> Vec<(Node, u64)> {
        self.discovery_calls.lock().clone()
    }

    /// `(node, payload)` of every forwarded request.
    pub fn forward_calls(&self) -> Vec<(Node, Vec<u8>)> {
        self.forward_calls.lock().clone()
    }
}

#[async_trait]
impl ElectrumApi for ScriptedElectrumApi {
    async fn get_peer_info(
        &self,
        node: &Node,
        request_id: u64,
        _timeout: Duration,
    ) -> Result<Vec<Node>, DiscoveryError> {
        self.discovery_calls.lock().push((node.clone(), request_id));
        let answer = self.peer_answers.lock().pop_front();
        answer.unwrap_or(Err(DiscoveryError::NoValidPeers))
    }

    async fn send_request_bytes(
        &self,
        payload: &[u8],
        node: &Node,
        _timeout: Duration,
    ) -> Result<Vec<u8>, DiscoveryError> {
        self.forward_calls
            .lock()
            .push((node.clone(), payload.to_vec()));
        let answer = self.forward_answers.lock().pop_front();
        answer.unwrap_or_else(|| Ok(payload.to_vec()))
    }
}

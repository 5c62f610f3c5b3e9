//! # Bootstrap Flow
//!
//! Seed node -> discovery client -> peer registry -> forward to a discovered
//! peer, all over real loopback sockets.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use er_01_peer_discovery::{
        ElectrumClient, MockBehaviour, MockElectrumNode, RecordingEventSink, RpcExchange,
    };
    use er_02_relay::{Relay, RelayError, RelayState};

    use super::super::{loopback_entry, onion_entry, seed_reply};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn relay(sink: Arc<RecordingEventSink>) -> Relay {
        let client = ElectrumClient::with_exchange(
            RpcExchange::new(Duration::from_millis(500), 64 * 1024),
            sink.clone(),
        )
        .unwrap();
        Relay::new(vec![], Arc::new(client), sink)
            .with_timeouts(Duration::from_secs(2), Duration::from_secs(2))
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_bootstrap_then_forward_to_discovered_peer() {
        let upstream = MockElectrumNode::replying(r#"{"jsonrpc":"2.0","id":11,"result":"pong"}"#)
            .await
            .unwrap();
        let seed = MockElectrumNode::replying(seed_reply(vec![
            loopback_entry(&upstream),
            onion_entry(),
        ]))
        .await
        .unwrap();

        let sink = Arc::new(RecordingEventSink::new());
        let relay = relay(sink.clone());
        assert_eq!(relay.state(), RelayState::Empty);

        let added = relay.bootstrap(&seed.node()).await.unwrap();
        assert_eq!(added, 2);
        assert_eq!(relay.state(), RelayState::Ready);

        let seed_requests = seed.received();
        assert_eq!(seed_requests.len(), 1);
        assert!(seed_requests[0].contains("server.peers.subscribe"));

        // Only the loopback peer is eligible; the onion peer is skipped.
        for _ in 0..3 {
            let response = relay
                .forward_request(br#"{"jsonrpc":"2.0","id":11,"method":"server.ping","params":[]}"#)
                .await
                .unwrap();
            assert_eq!(response, b"{\"jsonrpc\":\"2.0\",\"id\":11,\"result\":\"pong\"}\n");
        }
        assert_eq!(upstream.received().len(), 3);
        assert_eq!(
            upstream.received()[0],
            r#"{"jsonrpc":"2.0","id":11,"method":"server.ping","params":[]}"#
        );
        assert_eq!(sink.count("forwarded"), 3);
    }

    #[tokio::test]
    async fn test_bootstrap_without_valid_peers_leaves_relay_empty() {
        let seed = MockElectrumNode::replying(seed_reply(vec![serde_json::json!([
            "10.0.0.7",
            "-bad-host-",
            ["v1.4", "t50001"]
        ])]))
        .await
        .unwrap();

        let relay = relay(Arc::new(RecordingEventSink::new()));
        let err = relay.bootstrap(&seed.node()).await.unwrap_err();

        assert!(matches!(err, RelayError::Discovery(_)));
        assert_eq!(relay.state(), RelayState::Empty);
        assert!(matches!(
            relay.forward_request(b"{}").await,
            Err(RelayError::NoPeersAvailable)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_seed_fails_bootstrap() {
        let seed = MockElectrumNode::start(MockBehaviour::CloseImmediately)
            .await
            .unwrap();

        let relay = relay(Arc::new(RecordingEventSink::new()));
        assert!(relay.bootstrap(&seed.node()).await.is_err());
        assert_eq!(relay.peer_count(), 0);
    }

    #[tokio::test]
    async fn test_forward_failure_keeps_relay_serving() {
        let silent = MockElectrumNode::start(MockBehaviour::Silent).await.unwrap();
        let seed = MockElectrumNode::replying(seed_reply(vec![loopback_entry(&silent)]))
            .await
            .unwrap();

        let sink = Arc::new(RecordingEventSink::new());
        let relay = relay(sink.clone());
        relay.bootstrap(&seed.node()).await.unwrap();

        let started = std::time::Instant::now();
        let err = relay.forward_request(b"{}").await.unwrap_err();
        assert!(matches!(err, RelayError::ForwardFailed { .. }));
        assert!(started.elapsed() < Duration::from_secs(3));

        assert_eq!(relay.state(), RelayState::Ready);
        assert_eq!(relay.peer_count(), 1);
        assert_eq!(sink.count("forward_failed"), 1);
    }
}

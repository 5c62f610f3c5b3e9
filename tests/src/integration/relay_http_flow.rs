//! # HTTP Relay Flow
//!
//! HTTP client -> gateway router -> relay -> upstream Electrum node, with the
//! relay wired by the runtime from a TOML configuration file.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use er_01_peer_discovery::{MockBehaviour, MockElectrumNode};
    use er_03_http_gateway::{GatewayService, ERROR_PLACEHOLDER};
    use relay_runtime::{RelayRuntime, RuntimeConfig};

    use super::super::{loopback_entry, seed_reply};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn config_file(seed: &MockElectrumNode, forbidden: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let forbidden: Vec<String> = forbidden.iter().map(|m| format!("{:?}", m)).collect();
        writeln!(
            file,
            r#"
[seed]
host = "127.0.0.1"
ssl_port = 0
tcp_port = {port}

[gateway]
host = "127.0.0.1"
port = 0

[relay]
forbidden_methods = [{forbidden}]
bootstrap_timeout_secs = 2
forward_timeout_secs = 2
read_deadline_secs = 1
"#,
            port = seed.port(),
            forbidden = forbidden.join(", "),
        )
        .unwrap();
        file
    }

    async fn ready_router(seed: &MockElectrumNode, forbidden: &[&str]) -> axum::Router {
        let file = config_file(seed, forbidden);
        let config = RuntimeConfig::from_file(file.path()).unwrap();
        config.validate().unwrap();

        let runtime = RelayRuntime::new(config.clone()).unwrap();
        runtime.bootstrap().await.unwrap();
        GatewayService::new(config.gateway, runtime.relay().clone())
            .unwrap()
            .router()
    }

    fn post(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap()
    }

    async fn text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_http_request_is_relayed_verbatim() {
        let upstream = MockElectrumNode::replying(
            r#"{"jsonrpc":"2.0","id":3,"result":["ElectrumX 1.16.0","1.4"]}"#,
        )
        .await
        .unwrap();
        let seed = MockElectrumNode::replying(seed_reply(vec![loopback_entry(&upstream)]))
            .await
            .unwrap();
        let router = ready_router(&seed, &[]).await;

        let body = r#"{"jsonrpc":"2.0","id":3,"method":"server.version","params":["relay","1.4"]}"#;
        let response = router.oneshot(post(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            text(response).await,
            "{\"jsonrpc\":\"2.0\",\"id\":3,\"result\":[\"ElectrumX 1.16.0\",\"1.4\"]}\n"
        );
        assert_eq!(upstream.received(), vec![body.to_string()]);
    }

    #[tokio::test]
    async fn test_forbidden_method_never_reaches_upstream() {
        let upstream = MockElectrumNode::replying(r#"{"id":1,"result":"txid"}"#)
            .await
            .unwrap();
        let seed = MockElectrumNode::replying(seed_reply(vec![loopback_entry(&upstream)]))
            .await
            .unwrap();
        let router = ready_router(&seed, &["blockchain.transaction.broadcast"]).await;

        let response = router
            .clone()
            .oneshot(post(
                r#"{"jsonrpc":"2.0","id":1,"method":"blockchain.transaction.broadcast","params":["0100"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, ERROR_PLACEHOLDER);
        assert!(upstream.received().is_empty());

        let response = router
            .oneshot(post(r#"{"jsonrpc":"2.0","id":2,"method":"server.ping","params":[]}"#))
            .await
            .unwrap();
        assert_eq!(text(response).await, "{\"id\":1,\"result\":\"txid\"}\n");
    }

    #[tokio::test]
    async fn test_upstream_closing_early_yields_placeholder() {
        let upstream = MockElectrumNode::start(MockBehaviour::Partial(r#"{"jsonrpc":"2.0","#.into()))
            .await
            .unwrap();
        let seed = MockElectrumNode::replying(seed_reply(vec![loopback_entry(&upstream)]))
            .await
            .unwrap();
        let router = ready_router(&seed, &[]).await;

        let response = router.oneshot(post("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, ERROR_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_health_after_bootstrap() {
        let upstream = MockElectrumNode::replying("{}").await.unwrap();
        let seed = MockElectrumNode::replying(seed_reply(vec![
            loopback_entry(&upstream),
            loopback_entry(&upstream),
        ]))
        .await
        .unwrap();
        let router = ready_router(&seed, &[]).await;

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["peers"], 2);
    }
}

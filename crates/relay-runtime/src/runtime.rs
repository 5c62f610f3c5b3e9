//! Wiring of discovery client, relay and gateway.

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

use er_01_peer_discovery::{ElectrumApi, ElectrumClient, RelayEventSink, TracingEventSink};
use er_02_relay::Relay;
use er_03_http_gateway::GatewayService;

use crate::config::RuntimeConfig;

/// A configured relay process.
pub struct RelayRuntime {
    config: RuntimeConfig,
    relay: Arc<Relay>,
}

impl RelayRuntime {
    /// Build the runtime with a real discovery client reporting to `tracing`.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let sink: Arc<dyn RelayEventSink> = Arc::new(TracingEventSink::new());
        let client = ElectrumClient::with_exchange(config.relay.exchange(), Arc::clone(&sink))
            .context("failed to create Electrum client")?;
        Ok(Self::with_client(config, Arc::new(client), sink))
    }

    /// Build the runtime around an existing client.
    pub fn with_client(
        config: RuntimeConfig,
        client: Arc<dyn ElectrumApi>,
        sink: Arc<dyn RelayEventSink>,
    ) -> Self {
        let relay = Relay::new(config.relay.forbidden_methods.clone(), client, sink)
            .with_config(config.relay.relay_config());
        Self {
            config,
            relay: Arc::new(relay),
        }
    }

    pub fn relay(&self) -> &Arc<Relay> {
        &self.relay
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Populate the registry from the configured seed.
    pub async fn bootstrap(&self) -> Result<usize> {
        let seed = self.config.seed.node();
        let added = self
            .relay
            .bootstrap(&seed)
            .await
            .with_context(|| format!("bootstrap from seed {} failed", seed))?;

        for peer in self.relay.peers() {
            info!(peer = %peer, "registered peer");
        }
        Ok(added)
    }

    /// Serve the gateway until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let gateway = GatewayService::new(self.config.gateway.clone(), self.relay)
            .context("invalid gateway configuration")?;
        gateway.serve(shutdown).await.context("HTTP gateway failed")
    }

    /// Bootstrap, then serve. A failed bootstrap aborts before listening.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let added = self.bootstrap().await?;
        info!(peers = added, "relay ready");
        self.serve(shutdown).await
    }
}

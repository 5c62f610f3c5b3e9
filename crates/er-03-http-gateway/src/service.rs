//! Gateway service: binds the listener and serves the router until shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use er_02_relay::Relay;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::router::{build_router, AppState};

/// HTTP front end for a [`Relay`].
pub struct GatewayService {
    config: GatewayConfig,
    relay: Arc<Relay>,
}

impl GatewayService {
    /// Create the service. The configuration is validated here.
    pub fn new(config: GatewayConfig, relay: Arc<Relay>) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, relay })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Router over this service's relay.
    pub fn router(&self) -> axum::Router {
        build_router(AppState {
            relay: Arc::clone(&self.relay),
            max_body_bytes: self.config.max_body_bytes,
        })
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        self.serve_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?local, peers = self.relay.peer_count(), "HTTP gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Serve)?;

        info!("HTTP gateway stopped");
        Ok(())
    }
}

//! # Electrum Relay
//!
//! Bootstraps from a seed node and relays JSON-RPC requests received over
//! HTTP to random Electrum peers.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use er_01_peer_discovery::{ElectrumClient, TracingEventSink};
use relay_runtime::{init_logging, probe, Cli, Command, PeersArgs, RelayRuntime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        RuntimeConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.json_logs {
        config.logging.json = true;
    }
    init_logging(&config.logging)?;

    match cli.action() {
        Command::Serve => {
            let runtime = RelayRuntime::new(config)?;
            runtime.run(shutdown_signal()).await
        }
        Command::Peers(args) => run_probe(args).await,
    }
}

async fn run_probe(args: &PeersArgs) -> Result<()> {
    let client = ElectrumClient::new(Arc::new(TracingEventSink::new()))
        .context("failed to create Electrum client")?;
    let target = probe::target(args);
    let peers = probe::probe(&client, args)
        .await
        .with_context(|| format!("peer discovery against {} failed", target))?;
    println!("{}", probe::render(&peers, args.json)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

//! Command line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Electrum JSON-RPC relay
#[derive(Parser, Debug)]
#[command(name = "electrum-relay", version)]
#[command(about = "Relay Electrum JSON-RPC requests to peers discovered from a seed node")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "ER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Bootstrap from the seed and serve the HTTP gateway (default)
    Serve,
    /// Ask one node for its peers and print them
    Peers(PeersArgs),
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct PeersArgs {
    /// Node host name or address
    pub host: String,

    /// TLS port (0 to disable)
    #[arg(long, default_value_t = 50002)]
    pub ssl_port: u16,

    /// Plain TCP port (0 to disable)
    #[arg(long, default_value_t = 0)]
    pub tcp_port: u16,

    /// Request id for `server.peers.subscribe`
    #[arg(long, default_value_t = 64)]
    pub id: u64,

    /// Connect and exchange timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Print the peers as JSON
    #[arg(long)]
    pub json: bool,
}

static DEFAULT_COMMAND: Command = Command::Serve;

impl Cli {
    /// Subcommand to run, `serve` when none was given.
    pub fn action(&self) -> &Command {
        self.command.as_ref().unwrap_or(&DEFAULT_COMMAND)
    }
}

//! # Electrum Relay Runtime
//!
//! Process entry point for the relay.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line
//! 2. Load configuration (TOML file, then `ER_*` environment overrides)
//! 3. Initialise logging
//! 4. Bootstrap the peer registry from the seed node (fatal on failure)
//! 5. Serve the HTTP gateway until Ctrl-C
//!
//! The `peers` subcommand skips 4 and 5 and prints one node's peer list.

pub mod cli;
pub mod config;
pub mod logging;
pub mod probe;
pub mod runtime;

pub use cli::{Cli, Command, PeersArgs};
pub use config::{ConfigError, LoggingConfig, RelaySection, RuntimeConfig, SeedConfig};
pub use logging::init_logging;
pub use runtime::RelayRuntime;

//! # Electrum Relay HTTP Gateway
//!
//! External interface of the relay.
//!
//! | Route | Behaviour |
//! |-------|-----------|
//! | `/` (any method) | body is a raw JSON-RPC request; relayed verbatim to a random peer |
//! | `GET /health` | relay state and peer count as JSON |
//!
//! `/` answers HTTP 200 in every case. When the request is rejected or
//! relaying fails the body is [`ERROR_PLACEHOLDER`] and the cause is logged.

pub mod config;
pub mod error;
pub mod router;
pub mod service;

pub use config::{ConfigError, GatewayConfig, DEFAULT_MAX_BODY_BYTES};
pub use error::GatewayError;
pub use router::{build_router, AppState, ERROR_PLACEHOLDER};
pub use service::GatewayService;

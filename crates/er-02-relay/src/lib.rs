//! # Electrum Relay
//!
//! Keeps a registry of Electrum peers discovered from a seed node and relays
//! client JSON-RPC requests, verbatim, to a randomly chosen one.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --bootstrap(seed)--> Bootstrapping --peers registered--> Ready
//!   ^                              |
//!   +-------- discovery failed ----+
//! ```
//!
//! ## Request path
//!
//! 1. [`Relay::validate_request`] rejects bodies containing a forbidden
//!    method name (plain substring match over the whole body).
//! 2. [`Relay::forward_request`] picks a random non-onion peer and returns
//!    its raw response line.
//!
//! Nothing is retried. A failed forward is reported to the caller and the
//! relay keeps serving with its existing peers.

pub mod domain;
pub mod service;

/// Scripted `ElectrumApi` double.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use domain::{MethodFilter, PeerRegistry, RelayError, RelayState};
pub use service::{Relay, RelayConfig};

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::ScriptedElectrumApi;

//! Domain Layer - Pure logic with no I/O
//!
//! - Peer registry with all-or-nothing batch registration
//! - Forbidden-method filter
//! - Relay lifecycle state and error taxonomy

pub mod errors;
pub mod filter;
pub mod registry;
pub mod state;

pub use errors::RelayError;
pub use filter::MethodFilter;
pub use registry::PeerRegistry;
pub use state::RelayState;

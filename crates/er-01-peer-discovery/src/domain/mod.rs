//! Domain Layer - Pure logic with no I/O
//!
//! - Address classification (routable IP, DNS hostname, onion suffix)
//! - Node records, advertised features and transport tier selection
//! - Error taxonomy shared by the transport, exchange and client layers

pub mod address;
pub mod errors;
pub mod node;

pub use address::{is_onion_addr, valid_hostname, valid_ip, ONION_SUFFIX};
pub use errors::{DiscoveryError, ExchangeError};
pub use node::{Features, Node, TransportKind};

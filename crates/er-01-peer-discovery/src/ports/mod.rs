//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** `ElectrumApi`, used by the relay
//! - **Driven Ports (Outbound):** `RelayEventSink`, supplied by the host

pub mod inbound;
pub mod outbound;

pub use inbound::ElectrumApi;
pub use outbound::{RelayEvent, RelayEventSink};

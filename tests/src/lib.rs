//! # Electrum Relay Test Suite
//!
//! Unified test crate for flows that cross crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── bootstrap_flow.rs   # seed discovery -> registry -> forward
//!     └── relay_http_flow.rs  # HTTP gateway -> relay -> upstream node
//! ```
//!
//! Every upstream node is an in-process mock bound to `127.0.0.1:0`.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p er-tests
//! cargo test -p er-tests integration::bootstrap_flow::
//! ```

pub mod integration;

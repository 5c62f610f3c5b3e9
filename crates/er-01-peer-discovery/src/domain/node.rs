//! Electrum Node Records
//!
//! A [`Node`] is everything the relay knows about one remote Electrum server:
//! where to reach it and which ports and protocol version it advertises.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::address::{is_onion_addr, valid_hostname, valid_ip};

/// A server on the Electrum network.
///
/// `ip` is empty when no routable address is known. Ports of `0` mean the
/// transport is not offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Hostname or dotted address used for dialing and TLS server name.
    pub host: String,
    /// Resolved routable IP address, if advertised.
    #[serde(default)]
    pub ip: String,
    /// Advertised server version (`v1.4.5`).
    #[serde(default)]
    pub version: String,
    /// TLS port, `0` if not offered.
    #[serde(default)]
    pub ssl_port: u16,
    /// Plain TCP port, `0` if not offered.
    #[serde(default)]
    pub tcp_port: u16,
    /// History pruning limit, `0` if the server keeps full history.
    #[serde(default)]
    pub pruning_limit: u64,
}

impl Node {
    /// Create a node record from all of its fields.
    pub fn new(
        host: impl Into<String>,
        ip: impl Into<String>,
        version: impl Into<String>,
        ssl_port: u16,
        tcp_port: u16,
        pruning_limit: u64,
    ) -> Self {
        Self {
            host: host.into(),
            ip: ip.into(),
            version: version.into(),
            ssl_port,
            tcp_port,
            pruning_limit,
        }
    }

    /// Create an operator-supplied seed record.
    pub fn seed(host: impl Into<String>, ssl_port: u16, tcp_port: u16) -> Self {
        Self {
            host: host.into(),
            ssl_port,
            tcp_port,
            ..Self::default()
        }
    }

    /// A record is usable iff it is addressable (routable IP or valid
    /// hostname) and offers at least one port.
    pub fn is_valid(&self) -> bool {
        (valid_ip(&self.ip) || valid_hostname(&self.host))
            && (self.ssl_port > 0 || self.tcp_port > 0)
    }

    /// True if this node is reachable only through Tor.
    pub fn is_onion(&self) -> bool {
        is_onion_addr(&self.host)
    }

    /// True if a TLS session can be attempted: the host is a real hostname
    /// (usable as TLS server name) and an SSL port is advertised.
    pub fn supports_tls(&self) -> bool {
        !valid_ip(&self.host) && valid_hostname(&self.host) && self.ssl_port > 0
    }

    /// Transport tier to use for this record, computed from its current fields.
    pub fn transport(&self) -> TransportKind {
        if self.is_onion() {
            TransportKind::Unsupported
        } else if self.supports_tls() {
            TransportKind::Tls
        } else {
            TransportKind::Plain
        }
    }

    /// Address to dial. Falls back to the IP for records decoded without
    /// a hostname.
    pub fn dial_host(&self) -> &str {
        if self.host.is_empty() {
            &self.ip
        } else {
            &self.host
        }
    }

    /// Overwrite the advertised features. No validation happens here.
    pub fn register_features(&mut self, features: &Features) {
        self.version = features.version.clone();
        self.ssl_port = features.ssl_port;
        self.tcp_port = features.tcp_port;
        self.pruning_limit = features.pruning_limit;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dial_host())?;
        if !self.ip.is_empty() && self.ip != self.host {
            write!(f, " ({})", self.ip)?;
        }
        write!(f, " s{} t{}", self.ssl_port, self.tcp_port)?;
        if !self.version.is_empty() {
            write!(f, " {}", self.version)?;
        }
        Ok(())
    }
}

/// Features advertised in the third element of a peer entry.
///
/// Only lives while one entry is decoded, then merged into a [`Node`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features {
    pub version: String,
    pub ssl_port: u16,
    pub tcp_port: u16,
    pub pruning_limit: u64,
}

/// Transport tier chosen for a connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Tor routing, which the relay refuses instead of downgrading.
    Unsupported,
    /// TLS over TCP to the SSL port.
    Tls,
    /// Plain TCP to the TCP port.
    Plain,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "tor"),
            Self::Tls => write!(f, "tls"),
            Self::Plain => write!(f, "tcp"),
        }
    }
}

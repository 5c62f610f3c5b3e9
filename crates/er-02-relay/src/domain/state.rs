use std::fmt;

/// Lifecycle of the relay.
///
/// `Empty -> Bootstrapping -> Ready`. Once a peer is registered the relay
/// stays `Ready`; a failed bootstrap falls back to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayState {
    Empty,
    Bootstrapping,
    Ready,
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Bootstrapping => "bootstrapping",
            Self::Ready => "ready",
        };
        f.write_str(s)
    }
}

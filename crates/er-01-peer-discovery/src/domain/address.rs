//! Address Classification
//!
//! Decides whether a string is a routable IP literal, a syntactically valid
//! DNS hostname, or a Tor onion address. These three predicates drive record
//! validity, peer-list decoding and transport selection.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Reserved top-level label of the Tor overlay network.
pub const ONION_SUFFIX: &str = ".onion";

/// Returns true if `addr` is reachable only through Tor.
///
/// The check is a case-sensitive suffix match.
pub fn is_onion_addr(addr: &str) -> bool {
    addr.ends_with(ONION_SUFFIX)
}

/// Returns true if `s` is an IP literal that is not private, loopback,
/// link-local unicast or link-local multicast.
///
/// IPv4-mapped IPv6 literals are classified by their embedded IPv4 address.
pub fn valid_ip(s: &str) -> bool {
    match s.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => routable_v4(&v4),
        Ok(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => routable_v4(&v4),
            None => routable_v6(&v6),
        },
        Err(_) => false,
    }
}

fn routable_v4(ip: &Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();
    // 224.0.0.0/24
    let link_local_multicast = a == 224 && b == 0 && c == 0;
    !(ip.is_private() || ip.is_loopback() || ip.is_link_local() || link_local_multicast)
}

fn routable_v6(ip: &Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    // fc00::/7
    let unique_local = (first & 0xfe00) == 0xfc00;
    // fe80::/10
    let link_local_unicast = (first & 0xffc0) == 0xfe80;
    // ff02::/16 (any flags nibble)
    let link_local_multicast = (first & 0xff0f) == 0xff02;
    !(unique_local || ip.is_loopback() || link_local_unicast || link_local_multicast)
}

/// Returns true if `hostname` matches the DNS label grammar.
///
/// Labels are dot-separated, each one or more ASCII alphanumerics with
/// optional internal hyphens. A label may not start or end with a hyphen.
/// The empty string is not a hostname, and neither is a name with an empty
/// label (leading, trailing or doubled dot).
pub fn valid_hostname(hostname: &str) -> bool {
    !hostname.is_empty() && hostname.split('.').all(valid_label)
}

fn valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_onion_suffix() {
        assert!(is_onion_addr(
            "duckduckgogg42xjoc72x3sjasowoarfbgcmvfimaftt6twagswzczad.onion"
        ));
        assert!(!is_onion_addr("duckduckgo.com"));
        assert!(!is_onion_addr("example.com"));
    }

    #[test]
    fn test_onion_suffix_is_case_sensitive() {
        assert!(!is_onion_addr("abcdef.ONION"));
    }

    #[test]
    fn test_valid_ip_public() {
        assert!(valid_ip("232.73.129.9"));
        assert!(valid_ip("164.132.182.11"));
        assert!(valid_ip("2001:4860:4860::8888"));
    }

    #[test]
    fn test_valid_ip_rejects_non_routable() {
        assert!(!valid_ip("127.0.0.1"));
        assert!(!valid_ip("192.168.0.1"));
        assert!(!valid_ip("10.1.2.3"));
        assert!(!valid_ip("172.16.0.1"));
        assert!(!valid_ip("169.254.10.10"));
        assert!(!valid_ip("224.0.0.251"));
        assert!(!valid_ip("::1"));
        assert!(!valid_ip("fd00::1"));
        assert!(!valid_ip("fe80::1"));
        assert!(!valid_ip("ff02::1"));
        assert!(!valid_ip("::ffff:192.168.1.1"));
    }

    #[test]
    fn test_valid_ip_rejects_garbage() {
        assert!(!valid_ip("hello, world!"));
        assert!(!valid_ip(""));
        assert!(!valid_ip("electrum.blockstream.info"));
    }

    #[test]
    fn test_valid_hostname() {
        assert!(valid_hostname("google.com"));
        assert!(valid_hostname("1.fulcrum-node.com"));
        assert!(valid_hostname("localhost"));
        assert!(valid_hostname("a"));
    }

    #[test]
    fn test_invalid_hostname() {
        assert!(!valid_hostname(""));
        assert!(!valid_hostname("👍___+"));
        assert!(!valid_hostname("-leading.com"));
        assert!(!valid_hostname("trailing-.com"));
        assert!(!valid_hostname("double..dot"));
        assert!(!valid_hostname("trailing.dot."));
        assert!(!valid_hostname("under_score.com"));
    }

    proptest! {
        #[test]
        fn prop_generated_hostnames_are_valid(labels in prop::collection::vec("[a-z0-9]([a-z0-9-]{0,10}[a-z0-9])?", 1..5)) {
            let name = labels.join(".");
            prop_assert!(valid_hostname(&name));
        }

        #[test]
        fn prop_hyphen_edges_are_invalid(label in "[a-z0-9]{1,10}") {
            let leading = format!("-{}", label);
            let trailing = format!("{}-", label);
            prop_assert!(!valid_hostname(&leading));
            prop_assert!(!valid_hostname(&trailing));
        }

        #[test]
        fn prop_private_v4_is_never_valid(b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let addr = format!("10.{}.{}.{}", b, c, d);
            prop_assert!(!valid_ip(&addr));
        }
    }
}

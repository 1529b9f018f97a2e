//! Pure CIDR block parsing and containment.
//!
//! Containment is computed on the integer representation of the
//! address (bitmask semantics via [`ipnet`]), never by string prefix
//! comparison. No state, no I/O.

use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::{LendgateError, LendgateResult};

/// Parse CIDR text into a canonical block.
///
/// Accepts `address/prefix` for both families; a bare address is
/// treated as a full-width host block (`/32` or `/128`). Host bits are
/// zeroed so `10.0.0.5/24` and `10.0.0.0/24` are the same stored
/// block. Malformed input — bad address text, prefix length out of
/// range — is rejected with [`LendgateError::InvalidBlock`] so it is
/// never stored.
pub fn parse_block(text: &str) -> LendgateResult<IpNet> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LendgateError::InvalidBlock {
            block: text.into(),
            reason: "empty input".into(),
        });
    }

    if text.contains('/') {
        return text
            .parse::<IpNet>()
            .map(|net| net.trunc())
            .map_err(|e| LendgateError::InvalidBlock {
                block: text.into(),
                reason: e.to_string(),
            });
    }

    // Bare host address: exact-match block at full prefix width.
    text.parse::<IpAddr>()
        .map(IpNet::from)
        .map_err(|e| LendgateError::InvalidBlock {
            block: text.into(),
            reason: e.to_string(),
        })
}

/// Does `addr` fall inside `block`?
///
/// Address families never cross: an IPv4 address cannot match an IPv6
/// block or vice versa.
pub fn matches(addr: IpAddr, block: &IpNet) -> bool {
    match (addr, block) {
        (IpAddr::V4(a), IpNet::V4(net)) => net.contains(&a),
        (IpAddr::V6(a), IpNet::V6(net)) => net.contains(&a),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn address_inside_block_matches() {
        let block = parse_block("10.0.0.0/24").unwrap();
        assert!(matches(addr("10.0.0.5"), &block));
        assert!(matches(addr("10.0.0.255"), &block));
    }

    #[test]
    fn address_outside_block_does_not_match() {
        let block = parse_block("10.0.0.0/24").unwrap();
        assert!(!matches(addr("10.0.1.5"), &block));
    }

    #[test]
    fn host_block_is_exact_match() {
        let block = parse_block("127.0.0.1/32").unwrap();
        assert!(matches(addr("127.0.0.1"), &block));
        assert!(!matches(addr("127.0.0.2"), &block));
    }

    #[test]
    fn zero_prefix_matches_everything_in_family() {
        let block = parse_block("0.0.0.0/0").unwrap();
        assert!(matches(addr("203.0.113.9"), &block));
        // Family boundary still holds for an open v4 range.
        assert!(!matches(addr("2001:db8::1"), &block));
    }

    #[test]
    fn families_never_cross() {
        let v6_block = parse_block("2001:db8::/32").unwrap();
        assert!(!matches(addr("10.0.0.1"), &v6_block));
        assert!(matches(addr("2001:db8::1"), &v6_block));
    }

    #[test]
    fn bare_address_parses_as_host_block() {
        let block = parse_block("192.168.1.10").unwrap();
        assert_eq!(block.prefix_len(), 32);
        assert!(matches(addr("192.168.1.10"), &block));
        assert!(!matches(addr("192.168.1.11"), &block));

        let v6 = parse_block("::1").unwrap();
        assert_eq!(v6.prefix_len(), 128);
    }

    #[test]
    fn host_bits_are_canonicalized() {
        let a = parse_block("10.0.0.5/24").unwrap();
        let b = parse_block("10.0.0.0/24").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_blocks_are_rejected() {
        for bad in ["", "not-a-cidr", "10.0.0.0/33", "10.0.0/24", "::1/129", "10.0.0.1/-1"] {
            let err = parse_block(bad).unwrap_err();
            assert!(
                matches!(err, LendgateError::InvalidBlock { .. }),
                "expected InvalidBlock for {bad:?}, got {err:?}"
            );
        }
    }
}

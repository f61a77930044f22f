//! Network bisection into internal and guest subnets.

use crate::error::{GuardError, Result};
use crate::models::{ip_after_block, HostRange, NetworkSpec, SubnetDetails, SubnetPair, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Longest prefix that still leaves one bit to split on.
pub const MAX_SPLIT_PREFIX: u8 = MAX_LENGTH - 2;

/// Split `base` in half: lower half is internal, upper half is guest.
///
/// Host bits of `base` are ignored. Prefixes longer than /30 are rejected
/// since at least one half would have no usable hosts.
pub fn split(base: NetworkSpec) -> Result<SubnetPair> {
    log::debug!("#Start split({base})");
    if base.prefix_len() > MAX_SPLIT_PREFIX {
        return Err(GuardError::InvalidNetwork(format!(
            "/{} cannot be split, prefix must be /{} or shorter",
            base.prefix_len(),
            MAX_SPLIT_PREFIX
        )));
    }

    let new_prefix = base.prefix_len() + 1;
    let internal = NetworkSpec::new(base.network(), new_prefix)?;
    let guest = NetworkSpec::new(ip_after_block(internal.network(), new_prefix)?, new_prefix)?;

    log::info!("Split {base} into internal {internal} and guest {guest}");
    Ok(SubnetPair {
        parent: base,
        internal,
        guest,
    })
}

/// Usable hosts of `net`, excluding network and broadcast addresses.
pub fn host_range(net: NetworkSpec) -> Result<HostRange> {
    if net.prefix_len() > MAX_SPLIT_PREFIX {
        return Err(GuardError::EmptySubnet(net));
    }
    Ok(HostRange {
        first: Ipv4Addr::from(u32::from(net.network()) + 1),
        last: Ipv4Addr::from(u32::from(net.broadcast()) - 1),
    })
}

/// Network, broadcast, netmask and host range of `net`.
pub fn describe(net: NetworkSpec) -> Result<SubnetDetails> {
    Ok(SubnetDetails {
        block: net,
        network: net.network(),
        broadcast: net.broadcast(),
        netmask: net.netmask(),
        hosts: host_range(net)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> NetworkSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_split_192_168_1_0_24() {
        let pair = split(net("192.168.1.0/24")).unwrap();
        assert_eq!(pair.internal, net("192.168.1.0/25"));
        assert_eq!(pair.guest, net("192.168.1.128/25"));

        let internal_hosts = host_range(pair.internal).unwrap();
        assert_eq!(internal_hosts.first, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(internal_hosts.last, Ipv4Addr::new(192, 168, 1, 126));

        let guest_hosts = host_range(pair.guest).unwrap();
        assert_eq!(guest_hosts.first, Ipv4Addr::new(192, 168, 1, 129));
        assert_eq!(guest_hosts.last, Ipv4Addr::new(192, 168, 1, 254));
    }

    #[test]
    fn test_split_ignores_host_bits() {
        assert_eq!(
            split(net("192.168.1.5/24")).unwrap(),
            split(net("192.168.1.0/24")).unwrap()
        );
    }

    #[test]
    fn test_split_halves_partition_parent() {
        let bases = [
            Ipv4Addr::new(0, 0, 0, 0),
            Ipv4Addr::new(10, 20, 30, 40),
            Ipv4Addr::new(172, 16, 255, 1),
            Ipv4Addr::new(255, 255, 255, 255),
        ];
        for addr in bases {
            for len in 0..=MAX_SPLIT_PREFIX {
                let base = NetworkSpec::new(addr, len).unwrap();
                let pair = split(base).unwrap();

                assert_eq!(pair.internal.prefix_len(), len + 1);
                assert_eq!(pair.guest.prefix_len(), len + 1);
                assert_eq!(pair.internal.size(), pair.guest.size());
                assert_eq!(pair.internal.size() * 2, base.size());

                // contiguous and covering the parent exactly
                assert_eq!(pair.internal.network(), base.network());
                assert_eq!(
                    u64::from(u32::from(pair.internal.broadcast())) + 1,
                    u64::from(u32::from(pair.guest.network()))
                );
                assert_eq!(pair.guest.broadcast(), base.broadcast());
                assert!(!pair.internal.contains(pair.guest.network()));
                assert!(!pair.guest.contains(pair.internal.broadcast()));
            }
        }
    }

    #[test]
    fn test_split_whole_space() {
        let pair = split(net("0.0.0.0/0")).unwrap();
        assert_eq!(pair.internal, net("0.0.0.0/1"));
        assert_eq!(pair.guest, net("128.0.0.0/1"));
    }

    #[test]
    fn test_split_rejects_long_prefixes() {
        assert!(split(net("192.168.1.0/30")).is_ok());
        for len in [31, 32] {
            let base = NetworkSpec::new(Ipv4Addr::new(192, 168, 1, 0), len).unwrap();
            assert!(matches!(split(base), Err(GuardError::InvalidNetwork(_))));
        }
    }

    #[test]
    fn test_describe() {
        let details = describe(net("192.168.1.128/25")).unwrap();
        assert_eq!(details.network, Ipv4Addr::new(192, 168, 1, 128));
        assert_eq!(details.broadcast, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(details.netmask, Ipv4Addr::new(255, 255, 255, 128));
        assert_eq!(details.hosts.to_string(), "192.168.1.129 - 192.168.1.254");
        assert!(describe(net("192.168.1.128/31")).is_err());
    }

    #[test]
    fn test_host_range_edges() {
        let range = host_range(net("10.0.0.0/30")).unwrap();
        assert_eq!(range.first, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(range.last, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(range.count(), 2);

        assert_eq!(host_range(net("0.0.0.0/0")).unwrap().count(), (1u64 << 32) - 2);

        assert!(matches!(
            host_range(net("10.0.0.0/31")),
            Err(GuardError::EmptySubnet(_))
        ));
        assert!(matches!(
            host_range(net("10.0.0.1/32")),
            Err(GuardError::EmptySubnet(_))
        ));
    }
}

//! Subnet pair and host range data models.

use super::NetworkSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// The two halves of a split network.
///
/// `internal` is always the lower half and `guest` the upper half of `parent`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetPair {
    /// Normalized block that was split.
    pub parent: NetworkSpec,
    /// Lower half, for staff devices and servers.
    pub internal: NetworkSpec,
    /// Upper half, for visitors.
    pub guest: NetworkSpec,
}

/// Which half of a [`SubnetPair`] an address falls in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Internal,
    Guest,
}

impl SubnetPair {
    /// Zone of `ip`, or `None` when it lies outside the parent block.
    pub fn zone_of(&self, ip: Ipv4Addr) -> Option<Zone> {
        if self.internal.contains(ip) {
            Some(Zone::Internal)
        } else if self.guest.contains(ip) {
            Some(Zone::Guest)
        } else {
            None
        }
    }
}

impl fmt::Display for SubnetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> internal {} + guest {}",
            self.parent, self.internal, self.guest
        )
    }
}

/// First and last usable host of a block.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostRange {
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
}

impl HostRange {
    /// Number of usable hosts in the range.
    pub fn count(&self) -> u64 {
        u64::from(u32::from(self.last)) - u64::from(u32::from(self.first)) + 1
    }
}

impl fmt::Display for HostRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.last)
    }
}

/// Display values for one subnet, as shown on screen and in reports.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetDetails {
    pub block: NetworkSpec,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub hosts: HostRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_24() -> SubnetPair {
        SubnetPair {
            parent: "192.168.1.0/24".parse().unwrap(),
            internal: "192.168.1.0/25".parse().unwrap(),
            guest: "192.168.1.128/25".parse().unwrap(),
        }
    }

    #[test]
    fn test_zone_of() {
        let pair = pair_24();
        assert_eq!(pair.zone_of(Ipv4Addr::new(192, 168, 1, 0)), Some(Zone::Internal));
        assert_eq!(pair.zone_of(Ipv4Addr::new(192, 168, 1, 127)), Some(Zone::Internal));
        assert_eq!(pair.zone_of(Ipv4Addr::new(192, 168, 1, 128)), Some(Zone::Guest));
        assert_eq!(pair.zone_of(Ipv4Addr::new(10, 0, 0, 1)), None);
    }

    #[test]
    fn test_host_range_display_and_count() {
        let range = HostRange {
            first: Ipv4Addr::new(192, 168, 1, 1),
            last: Ipv4Addr::new(192, 168, 1, 126),
        };
        assert_eq!(range.to_string(), "192.168.1.1 - 192.168.1.126");
        assert_eq!(range.count(), 126);
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(
            pair_24().to_string(),
            "192.168.1.0/24 -> internal 192.168.1.0/25 + guest 192.168.1.128/25"
        );
    }
}

//! IPv4 network blocks in CIDR notation.
//!
//! Provides [`NetworkSpec`] for representing a normalized IPv4 block,
//! along with the mask and boundary arithmetic used by the planner.

use crate::error::{GuardError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a netmask as u32.
///
/// # Examples
/// ```
/// use soho_guard::models::cidr_mask;
/// assert_eq!(cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(GuardError::InvalidNetwork(format!(
            "prefix length /{len} is too long"
        )))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address (all host bits zero) for a given IP and prefix length.
pub fn network_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address (all host bits one) for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Returns the first address following the block that contains `addr`.
///
/// Fails when the block is the last one of the address space.
pub fn ip_after_block(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let block_size = 1u64 << (MAX_LENGTH - len.min(MAX_LENGTH));
    let network_bits = u32::from(network_addr(addr, len)?) as u64;
    let next = network_bits + block_size;
    u32::try_from(next)
        .map(Ipv4Addr::from)
        .map_err(|_| GuardError::InvalidNetwork(format!("no block after {addr}/{len}")))
}

/// Prefix length of a dotted netmask such as `255.255.255.0`.
///
/// Returns `None` when the ones are not contiguous.
pub fn netmask_prefix(netmask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(netmask);
    let len = bits.leading_ones() as u8;
    if cidr_mask(len).ok()? == bits {
        Some(len)
    } else {
        None
    }
}

/// Parse a prefix given either as a number (`24`) or a dotted netmask (`255.255.255.0`).
fn parse_prefix(prefix: &str) -> Result<u8> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(GuardError::InvalidNetwork("empty prefix length".to_string()));
    }
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        let len: u8 = prefix
            .parse()
            .map_err(|_| GuardError::InvalidNetwork(format!("invalid prefix length {prefix}")))?;
        if len > MAX_LENGTH {
            return Err(GuardError::InvalidNetwork(format!(
                "prefix length /{len} is out of range 0-{MAX_LENGTH}"
            )));
        }
        return Ok(len);
    }
    Ipv4Addr::from_str(prefix)
        .ok()
        .and_then(netmask_prefix)
        .ok_or_else(|| GuardError::InvalidNetwork(format!("invalid netmask {prefix}")))
}

/// A contiguous IPv4 block, always normalized to its network address.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct NetworkSpec {
    addr: Ipv4Addr,
    prefix_len: u8,
}

impl NetworkSpec {
    /// Build a block from any address inside it; host bits are dropped.
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<NetworkSpec> {
        let addr = network_addr(addr, prefix_len)?;
        Ok(NetworkSpec { addr, prefix_len })
    }

    /// Build a block from the separate address and prefix fields of a form.
    pub fn from_parts(address: &str, prefix: &str) -> Result<NetworkSpec> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GuardError::InvalidNetwork("empty network address".to_string()));
        }
        let addr: Ipv4Addr = address
            .parse()
            .map_err(|_| GuardError::InvalidNetwork(format!("invalid address {address}")))?;
        let prefix_len = parse_prefix(prefix)?;
        NetworkSpec::new(addr, prefix_len)
    }

    /// The network address (lowest address of the block).
    pub fn network(&self) -> Ipv4Addr {
        self.addr
    }

    /// The broadcast address (highest address of the block).
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.mask())
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Netmask as u32. The prefix is validated on construction.
    pub fn mask(&self) -> u32 {
        let right_len = MAX_LENGTH - self.prefix_len;
        ((u32::MAX as u64 >> right_len) << right_len) as u32
    }

    /// Netmask in dotted form.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask())
    }

    /// Number of addresses in the block, network and broadcast included.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix_len)
    }

    /// Inclusive membership test over `[network, broadcast]`.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & self.mask() == u32::from(self.addr)
    }
}

impl FromStr for NetworkSpec {
    type Err = GuardError;

    /// Parse a CIDR string such as `192.168.1.0/24`.
    fn from_str(s: &str) -> Result<NetworkSpec> {
        let s = s.trim();
        match s.split_once('/') {
            Some((address, prefix)) if !prefix.contains('/') => {
                NetworkSpec::from_parts(address, prefix)
            }
            _ => Err(GuardError::InvalidNetwork(format!(
                "expected address/prefix, got '{s}'"
            ))),
        }
    }
}

impl Serialize for NetworkSpec {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NetworkSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<NetworkSpec, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NetworkSpec::from_str(&s).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for NetworkSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}
